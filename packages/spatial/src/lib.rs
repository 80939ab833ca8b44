#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! County boundary resolution.
//!
//! Loads the US county boundary dataset (GeoJSON) once per process, builds
//! an R-tree over per-county bounding boxes, and resolves coordinates to
//! counties with a ray-casting point-in-polygon test. The index is
//! immutable after construction and shared read-only; a load failure is a
//! typed error distinct from "no county contains this point".
//!
//! Coordinates are (lon, lat) GeoJSON order throughout.

pub mod dataset;
pub mod index;

pub use dataset::CountyBoundary;
pub use index::CountyIndex;

use thiserror::Error;

/// Errors from loading or parsing the county boundary dataset.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// HTTP request for the dataset failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading the dataset file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid county GeoJSON.
    #[error("GeoJSON parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}
