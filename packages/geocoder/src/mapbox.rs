//! Mapbox geocoding client.
//!
//! Reverse geocoding backs the county fallback: when boundary resolution
//! misses (or the dataset failed to load), the place hierarchy around the
//! point still yields state and county names. Forward geocoding feeds the
//! search box.
//!
//! See <https://docs.mapbox.com/api/search/geocoding/>

use std::fmt::Write as _;

use gridscout_geography_models::{CountyInfo, GeoPoint};

use crate::{GeocodeError, PlaceCandidate, PlaceSource, urlencoding};

/// Reverse-geocodes a point into county information.
///
/// Returns `Ok(None)` when the place hierarchy has no state, an expected
/// miss (open water, out of coverage) rather than an error.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn reverse_geocode(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    country: &str,
    point: &GeoPoint,
) -> Result<Option<CountyInfo>, GeocodeError> {
    let url = format!(
        "{base_url}/{lng},{lat}.json?access_token={token}&country={country}",
        lng = point.longitude(),
        lat = point.latitude(),
    );

    let resp = client.get(&url).send().await?;
    let body: serde_json::Value = resp.json().await?;

    Ok(parse_reverse_response(&body))
}

/// Forward-geocodes a free-text query into ranked place candidates.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn forward_geocode(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    country: &str,
    bbox: [f64; 4],
    limit: u32,
    query: &str,
) -> Result<Vec<PlaceCandidate>, GeocodeError> {
    let mut url = format!(
        "{base_url}/{query}.json?access_token={token}&country={country}",
        query = urlencoding(query),
    );
    write!(
        url,
        "&bbox={},{},{},{}&limit={limit}",
        bbox[0], bbox[1], bbox[2], bbox[3]
    )
    .unwrap();

    let resp = client.get(&url).send().await?;
    let body: serde_json::Value = resp.json().await?;

    parse_forward_response(&body)
}

/// Extracts county information from a reverse-geocode response.
///
/// Walks every feature's context for `region` (state) and `district`
/// (county) entries; a feature that is itself a district names the county
/// directly. If no district turns up, a second pass checks the contexts of
/// place/locality features.
fn parse_reverse_response(body: &serde_json::Value) -> Option<CountyInfo> {
    let features = body["features"].as_array()?;

    let mut state = String::new();
    let mut state_abbr = String::new();
    let mut county = String::new();

    for feature in features {
        if feature_has_place_type(feature, "district") {
            if let Some(text) = feature["text"].as_str() {
                county = text.to_string();
            }
        }

        for item in context_items(feature) {
            let id = item["id"].as_str().unwrap_or("");
            if id.starts_with("region") {
                if let Some(text) = item["text"].as_str() {
                    state = text.to_string();
                }
                if let Some(short_code) = item["short_code"].as_str() {
                    state_abbr = short_code.replace("US-", "");
                }
            } else if id.starts_with("district") {
                if let Some(text) = item["text"].as_str() {
                    county = text.to_string();
                }
            }
        }

        if !state.is_empty() && !county.is_empty() {
            break;
        }
    }

    // County sometimes only appears in the context of a place feature.
    if county.is_empty() {
        'outer: for feature in features {
            if feature_has_place_type(feature, "place")
                || feature_has_place_type(feature, "locality")
            {
                for item in context_items(feature) {
                    if !item["id"].as_str().unwrap_or("").starts_with("district") {
                        continue;
                    }
                    if let Some(text) = item["text"].as_str() {
                        county = text.to_string();
                        break 'outer;
                    }
                }
            }
        }
    }

    if state.is_empty() {
        return None;
    }

    Some(CountyInfo {
        state_abbr: if state_abbr.is_empty() {
            state.clone()
        } else {
            state_abbr
        },
        state,
        county: if county.is_empty() {
            "Unknown".to_string()
        } else {
            county
        },
        county_type: "County".to_string(),
        geoid: None,
    })
}

/// Maps forward-geocode features to [`PlaceCandidate`]s.
fn parse_forward_response(body: &serde_json::Value) -> Result<Vec<PlaceCandidate>, GeocodeError> {
    let features = body["features"]
        .as_array()
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing features array".to_string(),
        })?;

    let candidates = features
        .iter()
        .filter_map(|feature| {
            let center = feature["center"].as_array()?;
            let longitude = center.first()?.as_f64()?;
            let latitude = center.get(1)?.as_f64()?;

            Some(PlaceCandidate {
                id: feature["id"].as_str().unwrap_or_default().to_string(),
                name: feature["text"].as_str().unwrap_or_default().to_string(),
                formatted_address: feature["place_name"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
                latitude,
                longitude,
                types: feature["place_type"]
                    .as_array()
                    .map(|types| {
                        types
                            .iter()
                            .filter_map(|t| t.as_str().map(String::from))
                            .collect()
                    })
                    .unwrap_or_default(),
                source: PlaceSource::Mapbox,
            })
        })
        .collect();

    Ok(candidates)
}

fn feature_has_place_type(feature: &serde_json::Value, place_type: &str) -> bool {
    feature["place_type"]
        .as_array()
        .is_some_and(|types| types.iter().any(|t| t.as_str() == Some(place_type)))
}

fn context_items(feature: &serde_json::Value) -> impl Iterator<Item = &serde_json::Value> {
    feature["context"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_state_and_county_from_context() {
        let body = serde_json::json!({
            "features": [{
                "place_type": ["address"],
                "text": "120 Main St",
                "context": [
                    { "id": "district.123", "text": "Chatham County" },
                    { "id": "region.456", "text": "North Carolina", "short_code": "US-NC" },
                ]
            }]
        });

        let county = parse_reverse_response(&body).unwrap();
        assert_eq!(county.state, "North Carolina");
        assert_eq!(county.state_abbr, "NC");
        assert_eq!(county.county, "Chatham County");
        assert_eq!(county.county_type, "County");
        assert!(county.geoid.is_none());
    }

    #[test]
    fn district_feature_names_the_county_directly() {
        let body = serde_json::json!({
            "features": [{
                "place_type": ["district"],
                "text": "Wake County",
                "context": [
                    { "id": "region.456", "text": "North Carolina", "short_code": "US-NC" },
                ]
            }]
        });

        let county = parse_reverse_response(&body).unwrap();
        assert_eq!(county.county, "Wake County");
    }

    #[test]
    fn county_from_place_context_second_pass() {
        let body = serde_json::json!({
            "features": [
                {
                    "place_type": ["region"],
                    "text": "North Carolina",
                    "context": [
                        { "id": "region.456", "text": "North Carolina", "short_code": "US-NC" },
                    ]
                },
                {
                    "place_type": ["place"],
                    "text": "Siler City",
                    "context": [
                        { "id": "district.123", "text": "Chatham County" },
                    ]
                }
            ]
        });

        let county = parse_reverse_response(&body).unwrap();
        assert_eq!(county.county, "Chatham County");
    }

    #[test]
    fn no_state_is_a_miss_not_an_error() {
        let body = serde_json::json!({ "features": [] });
        assert!(parse_reverse_response(&body).is_none());
    }

    #[test]
    fn missing_county_defaults_to_unknown() {
        let body = serde_json::json!({
            "features": [{
                "place_type": ["address"],
                "context": [
                    { "id": "region.456", "text": "North Carolina", "short_code": "US-NC" },
                ]
            }]
        });

        let county = parse_reverse_response(&body).unwrap();
        assert_eq!(county.county, "Unknown");
    }

    #[test]
    fn forward_features_map_to_candidates() {
        let body = serde_json::json!({
            "features": [{
                "id": "poi.789",
                "text": "Raleigh",
                "place_name": "Raleigh, North Carolina, United States",
                "center": [-78.6382, 35.7796],
                "place_type": ["place"]
            }]
        });

        let candidates = parse_forward_response(&body).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Raleigh");
        assert!((candidates[0].latitude - 35.7796).abs() < 1e-9);
        assert!((candidates[0].longitude - -78.6382).abs() < 1e-9);
        assert_eq!(candidates[0].source, PlaceSource::Mapbox);
    }

    #[test]
    fn forward_response_without_features_is_a_parse_error() {
        let body = serde_json::json!({ "message": "Not Authorized" });
        assert!(parse_forward_response(&body).is_err());
    }
}
