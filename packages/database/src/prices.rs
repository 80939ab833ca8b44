//! State electricity price lookups.

use gridscout_database_models::PriceRow;
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

const PRICE_COLUMNS: &str = "id, region_name,
     residential_2025, residential_2024,
     commercial_2025, commercial_2024,
     industrial_2025, industrial_2024,
     transportation_2025, transportation_2024,
     all_sectors_2025, all_sectors_2024";

/// Finds the electricity price row for a state.
///
/// Substring match on the EIA region name first; if that misses, a second
/// attempt matches the name without wildcards (region naming is not always
/// consistent with state naming). `Ok(None)` means no price data for the
/// region.
///
/// # Errors
///
/// Returns [`DbError`] if a store operation fails.
pub async fn lookup_price(db: &dyn Database, state: &str) -> Result<Option<PriceRow>, DbError> {
    let state = state.trim();
    if state.is_empty() {
        return Ok(None);
    }

    let sql = format!(
        "SELECT {PRICE_COLUMNS}
         FROM site_selection.eia_electricity_prices
         WHERE region_name ILIKE $1
         LIMIT 1"
    );

    let rows = db
        .query_raw_params(&sql, &[DatabaseValue::String(format!("%{state}%"))])
        .await?;

    if let Some(row) = rows.first() {
        return Ok(Some(map_price_row(row)));
    }

    let rows = db
        .query_raw_params(&sql, &[DatabaseValue::String(state.to_string())])
        .await?;

    Ok(rows.first().map(map_price_row))
}

fn map_price_row(row: &switchy_database::Row) -> PriceRow {
    PriceRow {
        id: row.to_value("id").unwrap_or(0),
        region_name: row.to_value("region_name").unwrap_or_default(),
        residential_2025: row.to_value("residential_2025").unwrap_or(None),
        residential_2024: row.to_value("residential_2024").unwrap_or(None),
        commercial_2025: row.to_value("commercial_2025").unwrap_or(None),
        commercial_2024: row.to_value("commercial_2024").unwrap_or(None),
        industrial_2025: row.to_value("industrial_2025").unwrap_or(None),
        industrial_2024: row.to_value("industrial_2024").unwrap_or(None),
        transportation_2025: row.to_value("transportation_2025").unwrap_or(None),
        transportation_2024: row.to_value("transportation_2024").unwrap_or(None),
        all_sectors_2025: row.to_value("all_sectors_2025").unwrap_or(None),
        all_sectors_2024: row.to_value("all_sectors_2024").unwrap_or(None),
    }
}
