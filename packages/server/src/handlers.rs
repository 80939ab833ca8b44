//! HTTP handler functions for the gridscout API.

use actix_web::{HttpResponse, web};
use gridscout_analysis::{assess_risk, rank_nearby};
use gridscout_database::{datacenters, filter_options, hazard, lines, plants, prices};
use gridscout_database_models::{CapacityRange, ViewportQuery, normalize_selection};
use gridscout_geocoder::service_registry::{self, ProviderConfig};
use gridscout_geocoder::{credential_from_env, mapbox};
use gridscout_geography_models::{BoundingBox, CountyInfo, GeoPoint, Viewport};
use gridscout_server_models::{
    AnalysisParams, ApiAnalysisResponse, ApiCountyResponse, ApiFilterOptions, ApiHazardResponse,
    ApiHealth, CountyParams, CountySource, HazardParams, LinesParams, PriceParams, SearchParams,
    ViewportParams,
};

use crate::{AppState, CountyState};

/// Approximate miles per degree of latitude, for the radius pre-filter box.
const MILES_PER_DEGREE_LAT: f64 = 69.0;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/power-plants`
///
/// Viewport query with attribute filters and zoom-scaled capping. Without a
/// bounding box there is nothing to query, matching the map's behavior of
/// not fetching until a viewport exists.
pub async fn power_plants(
    state: web::Data<AppState>,
    params: web::Query<ViewportParams>,
) -> HttpResponse {
    let Some(bounds) = params.bbox.as_deref().and_then(parse_bbox) else {
        return HttpResponse::Ok().json(serde_json::json!({ "plants": [] }));
    };

    let defaults = filter_options::FilterOptions::defaults();

    let query = ViewportQuery {
        viewport: Viewport {
            bounds,
            zoom: params.zoom.unwrap_or(1.0),
        },
        types: normalize_selection(
            params.types.as_deref().map(parse_csv_list),
            &defaults.types,
        ),
        statuses: normalize_selection(
            params.statuses.as_deref().map(parse_csv_list),
            &defaults.statuses,
        ),
        capacity: CapacityRange {
            min: params.capacity_min.unwrap_or(0.0),
            max: params.capacity_max.unwrap_or(CapacityRange::UNBOUNDED_MAX),
        },
    };

    match plants::query_power_plants(state.db.as_ref(), &query).await {
        Ok(rows) => HttpResponse::Ok().json(serde_json::json!({ "plants": rows })),
        Err(e) => {
            log::error!("Failed to query power plants: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to fetch power plants: {e}")
            }))
        }
    }
}

/// `GET /api/datacenters`
///
/// The full datacenter set; static overlay, no viewport narrowing. Falls
/// back to the base table when the enhanced view is unavailable.
pub async fn datacenters(state: web::Data<AppState>) -> HttpResponse {
    let rows = match datacenters::query_datacenters(state.db.as_ref(), true).await {
        Ok(rows) => Ok(rows),
        Err(e) => {
            log::warn!("Datacenter view query failed ({e}); falling back to base table");
            datacenters::query_datacenters(state.db.as_ref(), false).await
        }
    };

    match rows {
        Ok(rows) => HttpResponse::Ok().json(serde_json::json!({ "datacenters": rows })),
        Err(e) => {
            log::error!("Failed to query datacenters: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to fetch datacenters: {e}")
            }))
        }
    }
}

/// `GET /api/transmission-lines`
pub async fn transmission_lines(
    state: web::Data<AppState>,
    params: web::Query<LinesParams>,
) -> HttpResponse {
    let Some(bounds) = params.bbox.as_deref().and_then(parse_bbox) else {
        return HttpResponse::Ok().json(serde_json::json!({ "lines": [] }));
    };

    match lines::query_transmission_lines(state.db.as_ref(), &bounds).await {
        Ok(rows) => HttpResponse::Ok().json(serde_json::json!({ "lines": rows })),
        Err(e) => {
            log::error!("Failed to query transmission lines: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to fetch transmission lines: {e}")
            }))
        }
    }
}

/// Outcome of trying both county resolution paths.
enum CountyResolution {
    Found(CountyInfo, CountySource),
    NotFound,
    /// The boundary dataset never loaded and the fallback failed too.
    Unavailable(String),
}

/// Resolves a county: boundary index first, reverse geocoding second.
async fn resolve_county(state: &AppState, point: &GeoPoint) -> CountyResolution {
    match &state.counties {
        CountyState::Ready(index) => {
            if let Some(info) = index.resolve(point) {
                return CountyResolution::Found(info, CountySource::Boundaries);
            }
        }
        CountyState::Unavailable(message) => {
            log::debug!("County index unavailable ({message}); using geocoder fallback");
        }
    }

    match reverse_geocode_county(state, point).await {
        Ok(Some(info)) => CountyResolution::Found(info, CountySource::Geocoder),
        Ok(None) => match &state.counties {
            CountyState::Ready(_) => CountyResolution::NotFound,
            CountyState::Unavailable(message) => CountyResolution::Unavailable(message.clone()),
        },
        Err(e) => {
            log::warn!("Reverse geocoding fallback failed: {e}");
            match &state.counties {
                CountyState::Ready(_) => CountyResolution::NotFound,
                CountyState::Unavailable(message) => {
                    CountyResolution::Unavailable(format!("{message}; geocoder fallback: {e}"))
                }
            }
        }
    }
}

async fn reverse_geocode_county(
    state: &AppState,
    point: &GeoPoint,
) -> Result<Option<CountyInfo>, gridscout_geocoder::GeocodeError> {
    let Some(service) = service_registry::mapbox_service() else {
        return Ok(None);
    };
    let ProviderConfig::Mapbox {
        geocoding_url,
        country,
        token_env,
        ..
    } = service.provider
    else {
        return Ok(None);
    };

    let token = credential_from_env(&token_env)?;
    mapbox::reverse_geocode(&state.http, &geocoding_url, &token, &country, point).await
}

/// `GET /api/county`
pub async fn county(state: web::Data<AppState>, params: web::Query<CountyParams>) -> HttpResponse {
    let Ok(point) = GeoPoint::new(params.lat, params.lng) else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid coordinates"
        }));
    };

    match resolve_county(&state, &point).await {
        CountyResolution::Found(info, source) => HttpResponse::Ok().json(ApiCountyResponse {
            county: Some(info),
            source: Some(source),
        }),
        CountyResolution::NotFound => HttpResponse::Ok().json(ApiCountyResponse {
            county: None,
            source: None,
        }),
        CountyResolution::Unavailable(message) => {
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": format!("County data unavailable: {message}")
            }))
        }
    }
}

/// `GET /api/hazards`
pub async fn hazards(state: web::Data<AppState>, params: web::Query<HazardParams>) -> HttpResponse {
    match hazard::lookup_hazard(state.db.as_ref(), &params.state, params.county.as_deref()).await {
        Ok(Some(matched)) => {
            let fallback = matched.confidence == hazard::MatchConfidence::StateFallback;
            HttpResponse::Ok().json(ApiHazardResponse::new(matched.row, fallback))
        }
        // No data for the region is an expected outcome, not an error.
        Ok(None) => HttpResponse::Ok().json(serde_json::json!({ "hazard": null })),
        Err(e) => {
            log::error!("Failed to query hazard data: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to fetch hazard data: {e}")
            }))
        }
    }
}

/// `GET /api/prices`
pub async fn prices(state: web::Data<AppState>, params: web::Query<PriceParams>) -> HttpResponse {
    match prices::lookup_price(state.db.as_ref(), &params.state).await {
        Ok(row) => HttpResponse::Ok().json(serde_json::json!({ "price": row })),
        Err(e) => {
            log::error!("Failed to query electricity prices: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to fetch electricity prices: {e}")
            }))
        }
    }
}

/// `GET /api/search`
pub async fn search(state: web::Data<AppState>, params: web::Query<SearchParams>) -> HttpResponse {
    let suggestions = gridscout_search::search_places(&state.http, &params.q).await;
    HttpResponse::Ok().json(serde_json::json!({ "suggestions": suggestions }))
}

/// `GET /api/filter-options`
///
/// Discovery failures degrade to the static defaults so the filter panels
/// always render.
pub async fn filter_options(state: web::Data<AppState>) -> HttpResponse {
    let options = match filter_options::fetch_filter_options(state.db.as_ref()).await {
        Ok(options) if !options.types.is_empty() => options,
        Ok(_) => filter_options::FilterOptions::defaults(),
        Err(e) => {
            log::warn!("Filter option discovery failed ({e}); using defaults");
            filter_options::FilterOptions::defaults()
        }
    };

    HttpResponse::Ok().json(ApiFilterOptions {
        types: options.types,
        statuses: options.statuses,
    })
}

/// `GET /api/fiber-routes`
pub async fn fiber_routes(state: web::Data<AppState>) -> HttpResponse {
    match gridscout_fiber::fetch_routes(&state.http).await {
        Ok(routes) => HttpResponse::Ok().json(serde_json::json!({ "routes": routes })),
        Err(e) => {
            log::error!("Failed to fetch fiber routes: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to fetch fiber routes: {e}")
            }))
        }
    }
}

/// `GET /api/analysis`
///
/// One-shot location analysis: fetch plants around the point, rank by
/// distance, score composite risk, and resolve the county.
pub async fn analysis(
    state: web::Data<AppState>,
    params: web::Query<AnalysisParams>,
) -> HttpResponse {
    let Ok(point) = GeoPoint::new(params.lat, params.lng) else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid coordinates"
        }));
    };

    let radius_miles = params.radius.unwrap_or(30.0);
    let zoom = params.zoom.unwrap_or(8.0);

    let query = ViewportQuery::new(radius_bounds(&point, radius_miles), zoom);

    let plant_rows = match plants::query_power_plants(state.db.as_ref(), &query).await {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Failed to query power plants for analysis: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to analyze location: {e}")
            }));
        }
    };

    let ranked = rank_nearby(&plant_rows, &point, radius_miles);
    let within_radius: Vec<_> = ranked.iter().map(|r| r.entity).collect();
    let assessment = assess_risk(&within_radius);

    let (county_info, county_source) = match resolve_county(&state, &point).await {
        CountyResolution::Found(info, source) => (Some(info), Some(source)),
        CountyResolution::NotFound | CountyResolution::Unavailable(_) => (None, None),
    };

    HttpResponse::Ok().json(ApiAnalysisResponse::new(
        point,
        radius_miles,
        county_info,
        county_source,
        &assessment,
        &ranked,
    ))
}

/// Parses a bounding box string `"west,south,east,north"` into a
/// [`BoundingBox`].
fn parse_bbox(s: &str) -> Option<BoundingBox> {
    let parts: Vec<f64> = s.split(',').filter_map(|p| p.trim().parse().ok()).collect();
    if parts.len() == 4 {
        Some(BoundingBox::new(parts[0], parts[1], parts[2], parts[3]))
    } else {
        None
    }
}

/// Parses a comma-separated selection list. An empty string is an empty
/// selection (filter everything out), not "no filter".
fn parse_csv_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

/// A bounding box enclosing the radius around a point.
///
/// Coarse pre-filter only; the precise radius test happens in
/// `rank_nearby`, so overshoot from the degree approximation is harmless.
fn radius_bounds(point: &GeoPoint, radius_miles: f64) -> BoundingBox {
    let lat_delta = radius_miles / MILES_PER_DEGREE_LAT;
    let lon_scale = point.latitude().to_radians().cos().abs().max(1e-6);
    let lon_delta = radius_miles / (MILES_PER_DEGREE_LAT * lon_scale);

    BoundingBox::new(
        (point.longitude() - lon_delta).max(-180.0),
        (point.latitude() - lat_delta).max(-90.0),
        (point.longitude() + lon_delta).min(180.0),
        (point.latitude() + lat_delta).min(90.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bbox_strings() {
        let bbox = parse_bbox("-125, 24, -66, 49").unwrap();
        assert!((bbox.west - -125.0).abs() < f64::EPSILON);
        assert!((bbox.north - 49.0).abs() < f64::EPSILON);
        assert!(parse_bbox("-125,24,-66").is_none());
        assert!(parse_bbox("a,b,c,d").is_none());
    }

    #[test]
    fn empty_csv_is_an_empty_selection() {
        assert!(parse_csv_list("").is_empty());
        assert_eq!(parse_csv_list("solar, wind"), vec!["solar", "wind"]);
    }

    #[test]
    fn radius_bounds_enclose_the_radius() {
        let point = GeoPoint::new(35.7419, -79.5506).unwrap();
        let bounds = radius_bounds(&point, 30.0);

        assert!(bounds.contains(&point));

        // Points at the radius in each cardinal direction stay inside.
        let north = GeoPoint::new(35.7419 + 30.0 / 69.0, -79.5506).unwrap();
        assert!(bounds.contains(&north));
        let east_delta = 30.0 / (69.0 * 35.7419_f64.to_radians().cos());
        let east = GeoPoint::new(35.7419, -79.5506 + east_delta).unwrap();
        assert!(bounds.contains(&east));
    }

    #[test]
    fn radius_bounds_clamp_to_world_edges() {
        let point = GeoPoint::new(89.9, 179.9).unwrap();
        let bounds = radius_bounds(&point, 100.0);
        assert!(bounds.north <= 90.0);
        assert!(bounds.east <= 180.0);
    }
}
