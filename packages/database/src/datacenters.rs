//! Datacenter location queries.
//!
//! Datacenters are a static overlay: the whole set is loaded regardless of
//! viewport or zoom so markers stay visible at every scale. The enhanced
//! view carries parsed capacity and normalized status columns; when the
//! base table is queried instead, those fields are filled at fetch time.

use gridscout_database_models::DatacenterRow;
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::Database;

use crate::{DbError, normalize};

/// Queries all datacenter locations with usable coordinates.
///
/// With `use_view`, reads `datacenter_locations_view` (which precomputes
/// `has_coordinates`, `power_capacity_numeric`, and `status_normalized`)
/// ordered by capacity descending. Otherwise reads the base table ordered
/// by company and computes those fields locally.
///
/// # Errors
///
/// Returns [`DbError`] if the store operation fails.
pub async fn query_datacenters(
    db: &dyn Database,
    use_view: bool,
) -> Result<Vec<DatacenterRow>, DbError> {
    let sql = if use_view {
        "SELECT id, company, data_center, address, latitude, longitude,
                status, type, power_capacity_mw, estimated_finish,
                has_coordinates, power_capacity_numeric, status_normalized
         FROM site_selection.datacenter_locations_view
         WHERE has_coordinates = true
         ORDER BY power_capacity_numeric DESC"
    } else {
        "SELECT id, company, data_center, address, latitude, longitude,
                status, type, power_capacity_mw, estimated_finish
         FROM site_selection.datacenter_locations
         WHERE latitude IS NOT NULL AND longitude IS NOT NULL
         ORDER BY company"
    };

    let rows = db.query_raw_params(sql, &[]).await?;

    let mut datacenters: Vec<DatacenterRow> = rows
        .iter()
        .map(|row| map_datacenter_row(row, use_view))
        .collect();

    if !use_view {
        for dc in &mut datacenters {
            dc.power_capacity_numeric = dc
                .power_capacity_mw
                .as_deref()
                .and_then(normalize::parse_capacity_mw);
            dc.status_normalized = dc.status.as_deref().map(normalize::normalize_status);
            dc.has_coordinates = Some(dc.parsed_location().is_some());
        }
    }

    Ok(datacenters)
}

fn map_datacenter_row(row: &switchy_database::Row, use_view: bool) -> DatacenterRow {
    DatacenterRow {
        id: row.to_value("id").unwrap_or(0),
        company: row.to_value("company").unwrap_or(None),
        data_center: row.to_value("data_center").unwrap_or(None),
        address: row.to_value("address").unwrap_or(None),
        latitude: row.to_value("latitude").unwrap_or(None),
        longitude: row.to_value("longitude").unwrap_or(None),
        status: row.to_value("status").unwrap_or(None),
        datacenter_type: row.to_value("type").unwrap_or(None),
        power_capacity_mw: row.to_value("power_capacity_mw").unwrap_or(None),
        estimated_finish: row.to_value("estimated_finish").unwrap_or(None),
        has_coordinates: if use_view {
            row.to_value("has_coordinates").unwrap_or(None)
        } else {
            None
        },
        power_capacity_numeric: if use_view {
            row.to_value("power_capacity_numeric").unwrap_or(None)
        } else {
            None
        },
        status_normalized: if use_view {
            row.to_value("status_normalized").unwrap_or(None)
        } else {
            None
        },
    }
}
