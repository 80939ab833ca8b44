#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic value types shared across the site evaluation system.
//!
//! [`GeoPoint`] is the validated coordinate type every spatial computation
//! consumes: a point that exists at all is guaranteed finite and in range,
//! so distance and containment code never re-checks. Rows with nullable or
//! string-typed coordinates go through [`GeoPoint::from_optional`] or
//! [`GeoPoint::new`] at the boundary.

pub mod distance;
pub mod fips;

use serde::{Deserialize, Serialize};

/// A validated WGS84 coordinate pair.
///
/// Latitude is in `[-90, 90]`, longitude in `[-180, 180]`, both finite.
/// Construction is the only validation point; the fields are immutable
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

/// Unvalidated wire shape for [`GeoPoint`] deserialization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = InvalidCoordinateError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Creates a validated point.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] if either value is non-finite or
    /// out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinateError {
                axis: CoordinateAxis::Latitude,
                value: latitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinateError {
                axis: CoordinateAxis::Longitude,
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds a point from nullable coordinates, treating missing or invalid
    /// values as absent.
    ///
    /// Entities without a usable location are excluded from every spatial
    /// computation rather than erroring mid-pipeline.
    #[must_use]
    pub fn from_optional(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Self::new(latitude?, longitude?).ok()
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another point in miles.
    #[must_use]
    pub fn distance_miles(&self, other: &Self) -> f64 {
        distance::distance_miles(self, other)
    }
}

/// Which coordinate axis failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateAxis {
    /// Latitude (`[-90, 90]`).
    Latitude,
    /// Longitude (`[-180, 180]`).
    Longitude,
}

impl std::fmt::Display for CoordinateAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latitude => write!(f, "latitude"),
            Self::Longitude => write!(f, "longitude"),
        }
    }
}

/// Error returned when constructing a [`GeoPoint`] from an out-of-range or
/// non-finite coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCoordinateError {
    /// The axis that failed validation.
    pub axis: CoordinateAxis,
    /// The offending value.
    pub value: f64,
}

impl std::fmt::Display for InvalidCoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} value {}", self.axis, self.value)
    }
}

impl std::error::Error for InvalidCoordinateError {}

/// A geographic bounding box in WGS84 coordinates.
///
/// `west < east` and `south < north` are assumed but not enforced; boxes
/// crossing the antimeridian are out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Whether the point lies within the box (boundary inclusive).
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude() >= self.south
            && point.latitude() <= self.north
            && point.longitude() >= self.west
            && point.longitude() <= self.east
    }
}

/// The visible map region: a bounding box plus the current zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Visible bounds.
    pub bounds: BoundingBox,
    /// Map zoom level (higher = closer).
    pub zoom: f64,
}

/// A resolved administrative county.
///
/// Produced by the boundary resolver or the reverse-geocoding fallback and
/// consumed by the hazard/price joins. `geoid` is only present when the
/// county came from the boundary dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyInfo {
    /// Full state name (e.g. "North Carolina").
    pub state: String,
    /// Two-letter state abbreviation.
    pub state_abbr: String,
    /// County name without the type suffix (e.g. "Chatham").
    pub county: String,
    /// Administrative unit type (almost always "County").
    pub county_type: String,
    /// Census GEOID (state FIPS + county FIPS), when known.
    pub geoid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_coordinates() {
        let p = GeoPoint::new(35.7419, -79.5506).unwrap();
        assert!((p.latitude() - 35.7419).abs() < f64::EPSILON);
        assert!((p.longitude() - -79.5506).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(GeoPoint::new(90.1, 0.0).is_err());
        assert!(GeoPoint::new(-90.1, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 180.5).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
        assert!(GeoPoint::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn from_optional_treats_invalid_as_absent() {
        assert!(GeoPoint::from_optional(None, Some(-79.0)).is_none());
        assert!(GeoPoint::from_optional(Some(f64::NAN), Some(-79.0)).is_none());
        assert!(GeoPoint::from_optional(Some(35.0), Some(-79.0)).is_some());
    }

    #[test]
    fn bbox_contains_is_boundary_inclusive() {
        let bbox = BoundingBox::new(-80.0, 35.0, -78.0, 36.0);
        assert!(bbox.contains(&GeoPoint::new(35.5, -79.0).unwrap()));
        assert!(bbox.contains(&GeoPoint::new(35.0, -80.0).unwrap()));
        assert!(!bbox.contains(&GeoPoint::new(36.5, -79.0).unwrap()));
        assert!(!bbox.contains(&GeoPoint::new(35.5, -77.9).unwrap()));
    }

    #[test]
    fn geo_point_deserialization_validates() {
        let ok: Result<GeoPoint, _> =
            serde_json::from_str(r#"{"latitude": 35.0, "longitude": -79.0}"#);
        assert!(ok.is_ok());
        let bad: Result<GeoPoint, _> =
            serde_json::from_str(r#"{"latitude": 95.0, "longitude": -79.0}"#);
        assert!(bad.is_err());
    }
}
