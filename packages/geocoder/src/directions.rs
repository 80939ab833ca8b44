//! Mapbox directions client.
//!
//! Used only to approximate fiber corridor geometry with a driving route
//! along the corridor's highway; the exact curve is cosmetic.
//!
//! See <https://docs.mapbox.com/api/navigation/directions/>

use crate::GeocodeError;

/// Fetches the driving-route polyline through the given `(lon, lat)`
/// waypoints.
///
/// Returns `Ok(None)` when the service finds no route.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn driving_route(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    waypoints: &[(f64, f64)],
) -> Result<Option<Vec<(f64, f64)>>, GeocodeError> {
    let coordinates = waypoints
        .iter()
        .map(|(lon, lat)| format!("{lon},{lat}"))
        .collect::<Vec<_>>()
        .join(";");

    let url = format!(
        "{base_url}/{coordinates}\
         ?access_token={token}\
         &geometries=geojson\
         &overview=full\
         &steps=false\
         &alternatives=false"
    );

    let resp = client.get(&url).send().await?;
    let body: serde_json::Value = resp.json().await?;

    parse_route_geometry(&body)
}

/// Extracts the first route's `(lon, lat)` coordinate list.
fn parse_route_geometry(
    body: &serde_json::Value,
) -> Result<Option<Vec<(f64, f64)>>, GeocodeError> {
    let routes = body["routes"].as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Missing routes array".to_string(),
    })?;

    let Some(route) = routes.first() else {
        return Ok(None);
    };

    let coordinates = route["geometry"]["coordinates"]
        .as_array()
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing route geometry".to_string(),
        })?;

    let polyline = coordinates
        .iter()
        .filter_map(|pair| {
            let coords = pair.as_array()?;
            Some((coords.first()?.as_f64()?, coords.get(1)?.as_f64()?))
        })
        .collect();

    Ok(Some(polyline))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_geometry() {
        let body = serde_json::json!({
            "routes": [{
                "geometry": {
                    "coordinates": [[-79.85, 35.71], [-79.55, 35.74], [-78.99, 35.80]]
                }
            }]
        });

        let polyline = parse_route_geometry(&body).unwrap().unwrap();
        assert_eq!(polyline.len(), 3);
        assert!((polyline[1].0 - -79.55).abs() < 1e-9);
        assert!((polyline[1].1 - 35.74).abs() < 1e-9);
    }

    #[test]
    fn no_routes_is_a_typed_absence() {
        let body = serde_json::json!({ "routes": [] });
        assert!(parse_route_geometry(&body).unwrap().is_none());
    }

    #[test]
    fn missing_routes_array_is_a_parse_error() {
        let body = serde_json::json!({ "message": "Forbidden" });
        assert!(parse_route_geometry(&body).is_err());
    }
}
