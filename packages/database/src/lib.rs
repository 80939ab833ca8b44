#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Queries against the hosted `site_selection` store.
//!
//! The store is external and schema-managed elsewhere; everything here is
//! read-only `query_raw_params()` access through the `switchy_database`
//! trait object. Spatial narrowing happens in SQL (coordinate range
//! predicates); precise radius work happens in memory afterwards, in
//! `gridscout_analysis`.

pub mod datacenters;
pub mod db;
pub mod filter_options;
pub mod hazard;
pub mod lines;
pub mod normalize;
pub mod plants;
pub mod prices;

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Store query error; the upstream message is preserved.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
