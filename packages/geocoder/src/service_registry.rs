//! Compile-time registry of geocoding service configurations.
//!
//! Each provider is defined in a TOML file under `services/`. The registry
//! embeds these at compile time and exposes them via [`all_services`] and
//! [`enabled_services`].

use serde::Deserialize;

/// A geocoding service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingService {
    /// Unique identifier (e.g., `"mapbox"`, `"google_places"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this service is active.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Execution order — lower values run first.
    pub priority: u32,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Mapbox geocoding + directions.
    Mapbox {
        /// Forward/reverse geocoding base URL.
        geocoding_url: String,
        /// Driving directions base URL.
        directions_url: String,
        /// ISO country code for result filtering.
        country: String,
        /// Search bounding box `[west, south, east, north]`.
        bbox: [f64; 4],
        /// Maximum forward-geocode candidates.
        limit: u32,
        /// Environment variable holding the access token.
        token_env: String,
    },
    /// Google Places text search.
    GooglePlaces {
        /// Places API base URL.
        base_url: String,
        /// Location bias (e.g. `"country:us"`).
        location_bias: String,
        /// Environment variable holding the API key.
        key_env: String,
    },
}

const fn default_true() -> bool {
    true
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[
    ("mapbox", include_str!("../services/mapbox.toml")),
    ("google_places", include_str!("../services/google_places.toml")),
];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 2;

/// Returns all geocoding service configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<GeocodingService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse geocoding service '{name}': {e}"))
        })
        .collect()
}

/// Returns only enabled services, sorted by priority (ascending).
#[must_use]
pub fn enabled_services() -> Vec<GeocodingService> {
    let mut services: Vec<GeocodingService> =
        all_services().into_iter().filter(|s| s.enabled).collect();
    services.sort_by_key(|s| s.priority);
    services
}

/// Returns the Mapbox service configuration, if enabled.
#[must_use]
pub fn mapbox_service() -> Option<GeocodingService> {
    enabled_services()
        .into_iter()
        .find(|s| matches!(s.provider, ProviderConfig::Mapbox { .. }))
}

/// Returns the Google Places service configuration, if enabled.
#[must_use]
pub fn google_places_service() -> Option<GeocodingService> {
    enabled_services()
        .into_iter()
        .find(|s| matches!(s.provider, ProviderConfig::GooglePlaces { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_services() {
        let services = all_services();
        assert_eq!(services.len(), EXPECTED_SERVICE_COUNT);
    }

    #[test]
    fn service_ids_are_unique() {
        let services = all_services();
        let mut seen = BTreeSet::new();
        for svc in &services {
            assert!(seen.insert(&svc.id), "Duplicate service ID: {}", svc.id);
        }
    }

    #[test]
    fn both_providers_are_discoverable() {
        assert!(mapbox_service().is_some());
        assert!(google_places_service().is_some());
    }

    #[test]
    fn mapbox_bbox_covers_the_continental_us() {
        let Some(service) = mapbox_service() else {
            panic!("mapbox service missing");
        };
        let ProviderConfig::Mapbox { bbox, .. } = service.provider else {
            panic!("wrong provider type");
        };
        assert!(bbox[0] < bbox[2]);
        assert!(bbox[1] < bbox[3]);
    }

    #[test]
    fn enabled_services_sorted_by_priority() {
        let services = enabled_services();
        for window in services.windows(2) {
            assert!(window[0].priority <= window[1].priority);
        }
    }
}
