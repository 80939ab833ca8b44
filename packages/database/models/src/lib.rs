#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Row types and query parameter definitions for the hosted store.
//!
//! These types mirror the shapes of the `site_selection` schema tables.
//! They are distinct from the API response types in
//! `gridscout_server_models`, which can evolve independently of the store
//! schema. Rows are fetched fresh per query and never mutated afterwards.

pub mod hazard;

pub use hazard::{HazardKey, HazardRow};

use gridscout_geography_models::{BoundingBox, GeoPoint, Viewport};
use gridscout_infra_models::SiteProjection;
use serde::{Deserialize, Serialize};

/// A power plant row from `global_integrated_power`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerPlantRow {
    /// Primary key.
    pub id: i64,
    /// Fuel/type category (e.g. "coal", "solar", "oil/gas").
    #[serde(rename = "type")]
    pub plant_type: Option<String>,
    /// Country or area name.
    pub country_area: Option<String>,
    /// Subregion name.
    pub subregion: Option<String>,
    /// Region name.
    pub region: Option<String>,
    /// Plant or project name.
    pub plant_project_name: Option<String>,
    /// Nameplate capacity in MW.
    pub capacity_mw: Option<f64>,
    /// Free-form status string (e.g. "operating", "construction").
    pub status: Option<String>,
    /// Generation technology.
    pub technology: Option<String>,
    /// Latitude (WGS84), null for plants without coordinates.
    pub latitude: Option<f64>,
    /// Longitude (WGS84), null for plants without coordinates.
    pub longitude: Option<f64>,
    /// Global Energy Monitor wiki URL.
    pub gem_wiki_url: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Fuel detail string.
    pub fuel: Option<String>,
    /// Year generation started.
    pub start_year: Option<i32>,
    /// State/province name.
    pub subnational_unit_state_province: Option<String>,
}

impl SiteProjection for PowerPlantRow {
    fn location(&self) -> Option<GeoPoint> {
        GeoPoint::from_optional(self.latitude, self.longitude)
    }

    fn magnitude_mw(&self) -> Option<f64> {
        self.capacity_mw
    }

    fn category(&self) -> Option<&str> {
        self.plant_type.as_deref()
    }
}

/// A datacenter row from `datacenter_locations` (or its view).
///
/// The store keeps coordinates and capacity as free-form strings; the view
/// adds parsed/normalized columns. When querying the base table the query
/// layer fills the computed fields itself at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatacenterRow {
    /// Primary key.
    pub id: i64,
    /// Operating company.
    pub company: Option<String>,
    /// Facility name.
    pub data_center: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Latitude as stored (string, possibly empty).
    pub latitude: Option<String>,
    /// Longitude as stored (string, possibly empty).
    pub longitude: Option<String>,
    /// Free-form status string.
    pub status: Option<String>,
    /// Facility type.
    #[serde(rename = "type")]
    pub datacenter_type: Option<String>,
    /// Power capacity as stored (e.g. "up to 300 MW").
    pub power_capacity_mw: Option<String>,
    /// Estimated completion (e.g. "Q3 2026").
    pub estimated_finish: Option<String>,
    /// Whether both coordinate strings parse (view column).
    pub has_coordinates: Option<bool>,
    /// Parsed capacity in MW (view column, or filled at fetch time).
    pub power_capacity_numeric: Option<f64>,
    /// Normalized status (view column, or filled at fetch time).
    pub status_normalized: Option<String>,
}

impl DatacenterRow {
    /// Parses the stored coordinate strings into a validated point.
    #[must_use]
    pub fn parsed_location(&self) -> Option<GeoPoint> {
        let latitude = self.latitude.as_deref()?.trim().parse::<f64>().ok();
        let longitude = self.longitude.as_deref()?.trim().parse::<f64>().ok();
        GeoPoint::from_optional(latitude, longitude)
    }
}

impl SiteProjection for DatacenterRow {
    fn location(&self) -> Option<GeoPoint> {
        self.parsed_location()
    }

    fn magnitude_mw(&self) -> Option<f64> {
        self.power_capacity_numeric
    }

    fn category(&self) -> Option<&str> {
        self.datacenter_type.as_deref()
    }
}

/// A transmission line row from `transmission_lines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransmissionLineRow {
    /// Primary key.
    pub id: i64,
    /// Line geometry as stored (GeoJSON), passed through for rendering.
    pub geo_shape: Option<serde_json::Value>,
    /// Representative longitude.
    pub longitude: Option<f64>,
    /// Representative latitude.
    pub latitude: Option<f64>,
    /// Line length in source units.
    pub shape_length: Option<f64>,
    /// Owning utility.
    pub owner: Option<String>,
    /// Line type.
    #[serde(rename = "type")]
    pub line_type: Option<String>,
    /// Free-form status string.
    pub status: Option<String>,
    /// NAICS description.
    pub naics_desc: Option<String>,
}

impl SiteProjection for TransmissionLineRow {
    fn location(&self) -> Option<GeoPoint> {
        GeoPoint::from_optional(self.latitude, self.longitude)
    }

    fn magnitude_mw(&self) -> Option<f64> {
        None
    }

    fn category(&self) -> Option<&str> {
        self.line_type.as_deref()
    }
}

/// An electricity price row from `eia_electricity_prices` (cents/kWh).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRow {
    /// Primary key.
    pub id: i64,
    /// EIA region name (state for state-level rows).
    pub region_name: String,
    /// Residential rate, current year.
    pub residential_2025: Option<f64>,
    /// Residential rate, prior year.
    pub residential_2024: Option<f64>,
    /// Commercial rate, current year.
    pub commercial_2025: Option<f64>,
    /// Commercial rate, prior year.
    pub commercial_2024: Option<f64>,
    /// Industrial rate, current year.
    pub industrial_2025: Option<f64>,
    /// Industrial rate, prior year.
    pub industrial_2024: Option<f64>,
    /// Transportation rate, current year.
    pub transportation_2025: Option<f64>,
    /// Transportation rate, prior year.
    pub transportation_2024: Option<f64>,
    /// All-sectors rate, current year.
    pub all_sectors_2025: Option<f64>,
    /// All-sectors rate, prior year.
    pub all_sectors_2024: Option<f64>,
}

/// Capacity range filter in MW.
///
/// The default upper bound is a sentinel meaning "unbounded above": only a
/// `max` below it adds an upper bound to the query, and only a `min` above
/// zero adds a lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRange {
    /// Lower bound in MW.
    pub min: f64,
    /// Upper bound in MW; [`Self::UNBOUNDED_MAX`] means no upper bound.
    pub max: f64,
}

impl CapacityRange {
    /// Sentinel upper bound meaning "no upper bound".
    pub const UNBOUNDED_MAX: f64 = 10_000.0;

    /// Whether the range constrains capacity from below.
    #[must_use]
    pub fn has_lower_bound(&self) -> bool {
        self.min > 0.0
    }

    /// Whether the range constrains capacity from above.
    #[must_use]
    pub fn has_upper_bound(&self) -> bool {
        self.max < Self::UNBOUNDED_MAX
    }
}

impl Default for CapacityRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: Self::UNBOUNDED_MAX,
        }
    }
}

/// Parameters for a viewport power-plant query.
///
/// `types`/`statuses` distinguish "no filter" (`None`) from "filter
/// everything out" (`Some` of an empty list, which yields zero rows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportQuery {
    /// Visible bounds plus zoom; zoom drives the result cap and the
    /// minimum-capacity floor.
    pub viewport: Viewport,
    /// Plant type selection, `None` for no filter.
    pub types: Option<Vec<String>>,
    /// Plant status selection, `None` for no filter.
    pub statuses: Option<Vec<String>>,
    /// Capacity range filter.
    pub capacity: CapacityRange,
}

impl ViewportQuery {
    /// Builds an unfiltered query for the given viewport.
    #[must_use]
    pub fn new(bounds: BoundingBox, zoom: f64) -> Self {
        Self {
            viewport: Viewport { bounds, zoom },
            types: None,
            statuses: None,
            capacity: CapacityRange::default(),
        }
    }
}

/// Normalizes a UI attribute selection into a query filter.
///
/// Selecting every available value is the same as not filtering, so the
/// full set collapses to `None` and the store query skips the predicate
/// entirely. An explicitly empty selection stays `Some([])`, "filter
/// everything out", and short-circuits to zero rows.
#[must_use]
pub fn normalize_selection(
    selected: Option<Vec<String>>,
    available: &[String],
) -> Option<Vec<String>> {
    let selected = selected?;
    if !selected.is_empty()
        && !available.is_empty()
        && available.iter().all(|value| selected.contains(value))
    {
        return None;
    }
    Some(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_range_default_is_unbounded() {
        let range = CapacityRange::default();
        assert!(!range.has_lower_bound());
        assert!(!range.has_upper_bound());
    }

    #[test]
    fn capacity_range_bounds() {
        let range = CapacityRange { min: 50.0, max: 500.0 };
        assert!(range.has_lower_bound());
        assert!(range.has_upper_bound());
    }

    #[test]
    fn datacenter_location_parses_coordinate_strings() {
        let row = DatacenterRow {
            id: 1,
            company: Some("Example".to_string()),
            data_center: None,
            address: None,
            latitude: Some("35.7419".to_string()),
            longitude: Some(" -79.5506 ".to_string()),
            status: None,
            datacenter_type: None,
            power_capacity_mw: None,
            estimated_finish: None,
            has_coordinates: None,
            power_capacity_numeric: None,
            status_normalized: None,
        };
        let location = row.parsed_location().unwrap();
        assert!((location.latitude() - 35.7419).abs() < 1e-9);
    }

    #[test]
    fn datacenter_bad_coordinate_strings_are_absent() {
        let row = DatacenterRow {
            id: 1,
            company: None,
            data_center: None,
            address: None,
            latitude: Some("unknown".to_string()),
            longitude: Some("-79.5".to_string()),
            status: None,
            datacenter_type: None,
            power_capacity_mw: None,
            estimated_finish: None,
            has_coordinates: None,
            power_capacity_numeric: None,
            status_normalized: None,
        };
        assert!(row.parsed_location().is_none());
    }

    #[test]
    fn full_selection_collapses_to_no_filter() {
        let available = vec!["coal".to_string(), "solar".to_string()];
        let selected = Some(vec!["solar".to_string(), "coal".to_string()]);
        assert_eq!(normalize_selection(selected, &available), None);
    }

    #[test]
    fn partial_selection_is_preserved() {
        let available = vec!["coal".to_string(), "solar".to_string()];
        let selected = Some(vec!["solar".to_string()]);
        assert_eq!(
            normalize_selection(selected, &available),
            Some(vec!["solar".to_string()])
        );
    }

    #[test]
    fn empty_selection_stays_explicit() {
        let available = vec!["coal".to_string(), "solar".to_string()];
        assert_eq!(normalize_selection(Some(Vec::new()), &available), Some(Vec::new()));
        assert_eq!(normalize_selection(None, &available), None);
    }
}
