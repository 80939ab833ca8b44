#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the gridscout server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the store row types so the API contract can evolve independently of
//! the hosted schema.

use gridscout_analysis::{Ranked, RiskAssessment};
use gridscout_database_models::{HazardRow, PowerPlantRow};
use gridscout_geography_models::{CountyInfo, GeoPoint};
use gridscout_infra_models::RiskTier;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Which subsystem resolved a county.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CountySource {
    /// Point-in-polygon against the boundary dataset.
    Boundaries,
    /// Reverse geocoding fallback.
    Geocoder,
}

/// Response from the county resolution endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCountyResponse {
    /// The resolved county, if any.
    pub county: Option<CountyInfo>,
    /// Which subsystem produced the result (absent when nothing matched).
    pub source: Option<CountySource>,
}

/// One hazard rating with its display metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHazardRating {
    /// Hazard display name.
    pub name: String,
    /// Display icon.
    pub icon: String,
    /// The county's rating, when present in the data.
    pub rating: Option<String>,
}

/// Response from the hazard lookup endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHazardResponse {
    /// The matched NRI county row.
    pub hazard: HazardRow,
    /// True when the match fell back to state-level data.
    pub fallback: bool,
    /// Per-hazard ratings in catalog order.
    pub ratings: Vec<ApiHazardRating>,
}

impl ApiHazardResponse {
    /// Builds the response from a matched row.
    #[must_use]
    pub fn new(hazard: HazardRow, fallback: bool) -> Self {
        let ratings = hazard
            .ratings()
            .map(|(key, rating)| ApiHazardRating {
                name: key.display_name().to_string(),
                icon: key.icon().to_string(),
                rating: rating.map(String::from),
            })
            .collect();

        Self {
            hazard,
            fallback,
            ratings,
        }
    }
}

/// A ranked nearby power plant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRankedPlant {
    /// The plant row.
    pub plant: PowerPlantRow,
    /// Distance from the analysis point in miles.
    pub distance_miles: f64,
}

impl From<&Ranked<'_, PowerPlantRow>> for ApiRankedPlant {
    fn from(ranked: &Ranked<'_, PowerPlantRow>) -> Self {
        Self {
            plant: ranked.entity.clone(),
            distance_miles: ranked.distance_miles,
        }
    }
}

/// Response from the location analysis endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAnalysisResponse {
    /// The analyzed location.
    pub location: GeoPoint,
    /// Search radius in miles.
    pub radius_miles: f64,
    /// Resolved county, if any.
    pub county: Option<CountyInfo>,
    /// Which subsystem resolved the county.
    pub county_source: Option<CountySource>,
    /// Composite infrastructure risk tier.
    pub risk_tier: RiskTier,
    /// Total nearby capacity in MW.
    pub total_capacity_mw: f64,
    /// Number of nearby fossil-fuel plants.
    pub fossil_fuel_count: usize,
    /// Nearby plants ordered by ascending distance.
    pub nearby_plants: Vec<ApiRankedPlant>,
}

impl ApiAnalysisResponse {
    /// Assembles the analysis response.
    #[must_use]
    pub fn new(
        location: GeoPoint,
        radius_miles: f64,
        county: Option<CountyInfo>,
        county_source: Option<CountySource>,
        assessment: &RiskAssessment,
        nearby: &[Ranked<'_, PowerPlantRow>],
    ) -> Self {
        Self {
            location,
            radius_miles,
            county,
            county_source,
            risk_tier: assessment.tier,
            total_capacity_mw: assessment.total_capacity_mw,
            fossil_fuel_count: assessment.fossil_fuel_count,
            nearby_plants: nearby.iter().map(ApiRankedPlant::from).collect(),
        }
    }
}

/// Response from the filter options endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFilterOptions {
    /// Distinct plant types.
    pub types: Vec<String>,
    /// Distinct plant statuses.
    pub statuses: Vec<String>,
}

/// Query parameters for the power plant viewport endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportParams {
    /// Bounding box as `west,south,east,north`.
    pub bbox: Option<String>,
    /// Current map zoom level.
    pub zoom: Option<f64>,
    /// Comma-separated type selection; present-but-empty filters all out.
    pub types: Option<String>,
    /// Comma-separated status selection; present-but-empty filters all out.
    pub statuses: Option<String>,
    /// Minimum capacity in MW.
    pub capacity_min: Option<f64>,
    /// Maximum capacity in MW.
    pub capacity_max: Option<f64>,
}

/// Query parameters for the transmission lines endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinesParams {
    /// Bounding box as `west,south,east,north`.
    pub bbox: Option<String>,
}

/// Query parameters for county resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyParams {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// Query parameters for hazard lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardParams {
    /// Full state name (substring matched).
    pub state: String,
    /// County name (substring matched), if known.
    pub county: Option<String>,
}

/// Query parameters for price lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceParams {
    /// Full state name (substring matched).
    pub state: String,
}

/// Query parameters for location search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text query.
    pub q: String,
}

/// Query parameters for location analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisParams {
    /// Latitude of the analyzed location.
    pub lat: f64,
    /// Longitude of the analyzed location.
    pub lng: f64,
    /// Search radius in miles (default 30).
    pub radius: Option<f64>,
    /// Zoom to apply to the backing viewport query (default 8).
    pub zoom: Option<f64>,
}
