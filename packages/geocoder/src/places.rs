//! Google Places text search client.
//!
//! Uses the "find place from text" endpoint with an explicit field list, so
//! one request carries everything a search candidate needs.
//!
//! See <https://developers.google.com/maps/documentation/places/web-service/search-find-place>

use crate::{GeocodeError, PlaceCandidate, PlaceSource, urlencoding};

/// Searches for places matching a free-text query.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn text_search(
    client: &reqwest::Client,
    base_url: &str,
    key: &str,
    location_bias: &str,
    query: &str,
) -> Result<Vec<PlaceCandidate>, GeocodeError> {
    let url = format!(
        "{base_url}/findplacefromtext/json\
         ?input={input}\
         &inputtype=textquery\
         &key={key}\
         &fields=place_id,name,geometry,formatted_address,types\
         &locationbias={location_bias}",
        input = urlencoding(query),
    );

    let resp = client.get(&url).send().await?;
    let body: serde_json::Value = resp.json().await?;

    parse_candidates(&body)
}

/// Maps the `candidates` array to [`PlaceCandidate`]s.
fn parse_candidates(body: &serde_json::Value) -> Result<Vec<PlaceCandidate>, GeocodeError> {
    let candidates = body["candidates"]
        .as_array()
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing candidates array".to_string(),
        })?;

    let places = candidates
        .iter()
        .filter_map(|place| {
            let location = &place["geometry"]["location"];
            let latitude = location["lat"].as_f64()?;
            let longitude = location["lng"].as_f64()?;

            Some(PlaceCandidate {
                id: place["place_id"].as_str().unwrap_or_default().to_string(),
                name: place["name"].as_str().unwrap_or_default().to_string(),
                formatted_address: place["formatted_address"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
                latitude,
                longitude,
                types: place["types"]
                    .as_array()
                    .map(|types| {
                        types
                            .iter()
                            .filter_map(|t| t.as_str().map(String::from))
                            .collect()
                    })
                    .unwrap_or_default(),
                source: PlaceSource::Google,
            })
        })
        .collect();

    Ok(places)
}
