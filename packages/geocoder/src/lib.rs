#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoding, place search, and directions clients.
//!
//! Two providers, configured via TOML files in `services/`:
//!
//! 1. **Mapbox**: reverse geocoding (the county fallback when boundary
//!    resolution misses), forward geocoding for the search box, and the
//!    directions API used to approximate fiber corridor geometry.
//! 2. **Google Places**: free-text place search, the second search-box
//!    provider.
//!
//! API tokens come from the environment at call time; a provider without
//! its token is skipped by callers rather than failing the whole search.

pub mod directions;
pub mod mapbox;
pub mod places;
pub mod service_registry;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// A place candidate from either search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCandidate {
    /// Provider-specific place identifier.
    pub id: String,
    /// Short display name.
    pub name: String,
    /// Full formatted address.
    pub formatted_address: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Provider category tags (e.g. "landmark", "point_of_interest").
    pub types: Vec<String>,
    /// Which provider produced this candidate.
    pub source: PlaceSource,
}

/// Which search provider produced a candidate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlaceSource {
    /// Mapbox forward geocoding.
    Mapbox,
    /// Google Places text search.
    Google,
}

/// Errors from geocoding, place search, or directions operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// A required API credential is not configured.
    #[error("Missing credential: {env} is not set")]
    MissingCredential {
        /// The environment variable that was expected.
        env: String,
    },
}

/// Reads a provider credential from the environment.
///
/// # Errors
///
/// Returns [`GeocodeError::MissingCredential`] if the variable is unset or
/// empty.
pub fn credential_from_env(env: &str) -> Result<String, GeocodeError> {
    std::env::var(env)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| GeocodeError::MissingCredential {
            env: env.to_string(),
        })
}

/// Simple percent-encoding for URL query parameters.
pub(crate) fn urlencoding(s: &str) -> String {
    s.replace(' ', "+")
        .replace('&', "%26")
        .replace('#', "%23")
        .replace('?', "%3F")
        .replace('/', "%2F")
}
