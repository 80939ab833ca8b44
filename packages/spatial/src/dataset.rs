//! County boundary dataset loading.
//!
//! The dataset is a GeoJSON `FeatureCollection` of Census county features
//! carrying `STATEFP`, `COUNTYFP`, `GEOID`, and `NAME` properties with
//! `Polygon` or `MultiPolygon` geometry in (lon, lat) order. It is loaded
//! once at startup, from disk or over HTTP, and never refetched.

use geo::MultiPolygon;
use geojson::GeoJson;

use crate::SpatialError;

/// One county record from the boundary dataset.
#[derive(Debug, Clone)]
pub struct CountyBoundary {
    /// Two-digit state FIPS code.
    pub state_fips: String,
    /// Three-digit county FIPS code.
    pub county_fips: String,
    /// Census GEOID (state FIPS + county FIPS).
    pub geoid: String,
    /// County name without the type suffix (e.g. "Chatham").
    pub name: String,
    /// Boundary geometry; a plain `Polygon` is promoted to a single-member
    /// `MultiPolygon`.
    pub geometry: MultiPolygon<f64>,
}

/// Loads the county dataset from a file on disk.
///
/// # Errors
///
/// Returns [`SpatialError`] if the file cannot be read or is not valid
/// county GeoJSON.
pub fn load_from_path(path: &std::path::Path) -> Result<Vec<CountyBoundary>, SpatialError> {
    let text = std::fs::read_to_string(path)?;
    parse_feature_collection(&text)
}

/// Fetches the county dataset over HTTP.
///
/// # Errors
///
/// Returns [`SpatialError`] if the request fails, returns a non-success
/// status, or the body is not valid county GeoJSON.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<CountyBoundary>, SpatialError> {
    let resp = client.get(url).send().await?.error_for_status()?;
    let text = resp.text().await?;
    parse_feature_collection(&text)
}

/// Parses a GeoJSON `FeatureCollection` into county boundary records.
///
/// Features missing required properties or carrying non-polygon geometry
/// are skipped with a warning rather than failing the whole dataset.
///
/// # Errors
///
/// Returns [`SpatialError::Parse`] if the text is not a GeoJSON
/// `FeatureCollection`.
pub fn parse_feature_collection(text: &str) -> Result<Vec<CountyBoundary>, SpatialError> {
    let geojson: GeoJson = text.parse().map_err(|e| SpatialError::Parse {
        message: format!("invalid GeoJSON: {e}"),
    })?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(SpatialError::Parse {
            message: "expected a FeatureCollection of county features".to_string(),
        });
    };

    let mut boundaries = Vec::with_capacity(collection.features.len());

    for feature in collection.features {
        let Some(properties) = &feature.properties else {
            log::warn!("Skipping county feature without properties");
            continue;
        };

        let prop = |key: &str| {
            properties
                .get(key)
                .and_then(|v| v.as_str())
                .map(String::from)
        };

        let (Some(state_fips), Some(county_fips), Some(geoid), Some(name)) = (
            prop("STATEFP"),
            prop("COUNTYFP"),
            prop("GEOID"),
            prop("NAME"),
        ) else {
            log::warn!("Skipping county feature with incomplete properties");
            continue;
        };

        let Some(geometry) = feature.geometry.and_then(to_multi_polygon) else {
            log::warn!("Skipping county {geoid} with missing or non-polygon geometry");
            continue;
        };

        boundaries.push(CountyBoundary {
            state_fips,
            county_fips,
            geoid,
            name,
            geometry,
        });
    }

    if boundaries.is_empty() {
        return Err(SpatialError::Parse {
            message: "dataset contained no usable county features".to_string(),
        });
    }

    Ok(boundaries)
}

/// Converts a GeoJSON geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multi_polygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "STATEFP": "37", "COUNTYFP": "037", "GEOID": "37037", "NAME": "Chatham"
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-79.9, 35.5], [-79.0, 35.5], [-79.0, 36.0], [-79.9, 36.0], [-79.9, 35.5]]]
                }
            },
            {
                "type": "Feature",
                "properties": {
                    "STATEFP": "37", "COUNTYFP": "183", "GEOID": "37183", "NAME": "Wake"
                },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[-78.9, 35.5], [-78.2, 35.5], [-78.2, 36.1], [-78.9, 36.1], [-78.9, 35.5]]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "STATEFP": "37" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_polygon_and_multipolygon_features() {
        let boundaries = parse_feature_collection(SAMPLE).unwrap();
        assert_eq!(boundaries.len(), 2);
        assert_eq!(boundaries[0].name, "Chatham");
        assert_eq!(boundaries[0].geoid, "37037");
        assert_eq!(boundaries[0].geometry.0.len(), 1);
        assert_eq!(boundaries[1].name, "Wake");
        assert_eq!(boundaries[1].county_fips, "183");
    }

    #[test]
    fn incomplete_features_are_skipped() {
        let boundaries = parse_feature_collection(SAMPLE).unwrap();
        assert!(boundaries.iter().all(|b| !b.name.is_empty()));
    }

    #[test]
    fn rejects_non_geojson() {
        assert!(matches!(
            parse_feature_collection("not geojson"),
            Err(SpatialError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_non_feature_collection() {
        let geometry_only = r#"{"type": "Point", "coordinates": [-79.0, 35.5]}"#;
        assert!(matches!(
            parse_feature_collection(geometry_only),
            Err(SpatialError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_empty_collections() {
        let empty = r#"{"type": "FeatureCollection", "features": []}"#;
        assert!(matches!(
            parse_feature_collection(empty),
            Err(SpatialError::Parse { .. })
        ));
    }
}
