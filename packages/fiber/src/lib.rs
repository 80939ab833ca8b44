#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fiber corridor overlay geometry.
//!
//! Corridor definitions are static ([`corridors::CORRIDORS`]); their
//! display curves come from the directions service, which follows the
//! corridor's highway through the listed waypoints. The exact curve is
//! cosmetic, so a failed corridor is skipped rather than failing the
//! overlay.

pub mod corridors;

pub use corridors::{CORRIDORS, FiberCorridor, FiberTier};

use gridscout_geocoder::service_registry::{self, ProviderConfig};
use gridscout_geocoder::{GeocodeError, credential_from_env, directions};
use serde::{Deserialize, Serialize};

/// A corridor with resolved display geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiberRoute {
    /// Corridor identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Road-following polyline in (lon, lat) order.
    pub coordinates: Vec<(f64, f64)>,
    /// Display color (hex).
    pub color: String,
    /// Network tier.
    pub fiber_type: FiberTier,
    /// Ownership/access label.
    pub label: String,
}

/// Fetches display geometry for every corridor.
///
/// Corridors are fetched concurrently; a corridor whose route lookup fails
/// is logged and skipped (settle-all), so the overlay renders whatever
/// resolved.
///
/// # Errors
///
/// Returns [`GeocodeError::MissingCredential`] if the directions service
/// has no access token; without it no corridor can resolve at all.
pub async fn fetch_routes(client: &reqwest::Client) -> Result<Vec<FiberRoute>, GeocodeError> {
    let Some(service) = service_registry::mapbox_service() else {
        return Ok(Vec::new());
    };
    let ProviderConfig::Mapbox {
        directions_url,
        token_env,
        ..
    } = service.provider
    else {
        return Ok(Vec::new());
    };

    let token = credential_from_env(&token_env)?;

    let fetches = CORRIDORS.iter().map(|corridor| {
        let directions_url = directions_url.clone();
        let token = token.clone();
        async move {
            match directions::driving_route(client, &directions_url, &token, corridor.waypoints)
                .await
            {
                Ok(Some(coordinates)) => Some(FiberRoute {
                    id: corridor.id.to_string(),
                    name: corridor.name.to_string(),
                    coordinates,
                    color: corridor.color.to_string(),
                    fiber_type: corridor.tier,
                    label: corridor.label.to_string(),
                }),
                Ok(None) => {
                    log::warn!("No route found for fiber corridor {}", corridor.id);
                    None
                }
                Err(e) => {
                    log::warn!("Failed to fetch fiber corridor {}: {e}", corridor.id);
                    None
                }
            }
        }
    });

    let routes = futures::future::join_all(fetches).await;

    Ok(routes.into_iter().flatten().collect())
}
