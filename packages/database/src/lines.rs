//! Viewport transmission line queries.

use std::fmt::Write as _;

use gridscout_database_models::TransmissionLineRow;
use gridscout_geography_models::BoundingBox;
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

/// Flat result cap for transmission line queries.
///
/// Lines carry full geometry payloads, so the cap does not scale with zoom
/// the way plant markers do.
pub const TRANSMISSION_LINE_CAP: u32 = 2000;

/// Queries transmission lines whose representative point falls within the
/// bounds and that carry renderable geometry.
///
/// # Errors
///
/// Returns [`DbError`] if the store operation fails.
pub async fn query_transmission_lines(
    db: &dyn Database,
    bounds: &BoundingBox,
) -> Result<Vec<TransmissionLineRow>, DbError> {
    let mut sql = String::from(
        "SELECT id, geo_shape, longitude, latitude, shape_length, owner,
                type, status, naics_desc
         FROM site_selection.transmission_lines
         WHERE geo_shape IS NOT NULL
           AND latitude IS NOT NULL AND longitude IS NOT NULL",
    );

    let mut params: Vec<DatabaseValue> = vec![
        DatabaseValue::Real64(bounds.south),
        DatabaseValue::Real64(bounds.north),
        DatabaseValue::Real64(bounds.west),
        DatabaseValue::Real64(bounds.east),
    ];
    sql.push_str(
        " AND latitude >= $1 AND latitude <= $2 AND longitude >= $3 AND longitude <= $4",
    );

    write!(sql, " LIMIT $5").unwrap();
    params.push(DatabaseValue::Int64(i64::from(TRANSMISSION_LINE_CAP)));

    let rows = db.query_raw_params(&sql, &params).await?;

    Ok(rows.iter().map(map_line_row).collect())
}

fn map_line_row(row: &switchy_database::Row) -> TransmissionLineRow {
    // geo_shape arrives as a JSON string; unparseable geometry is dropped
    // rather than failing the row.
    let geo_shape_text: Option<String> = row.to_value("geo_shape").unwrap_or(None);
    let geo_shape = geo_shape_text.and_then(|text| match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Dropping unparseable transmission line geometry: {e}");
            None
        }
    });

    TransmissionLineRow {
        id: row.to_value("id").unwrap_or(0),
        geo_shape,
        longitude: row.to_value("longitude").unwrap_or(None),
        latitude: row.to_value("latitude").unwrap_or(None),
        shape_length: row.to_value("shape_length").unwrap_or(None),
        owner: row.to_value("owner").unwrap_or(None),
        line_type: row.to_value("type").unwrap_or(None),
        status: row.to_value("status").unwrap_or(None),
        naics_desc: row.to_value("naics_desc").unwrap_or(None),
    }
}
