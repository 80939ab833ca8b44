//! Viewport power-plant queries.
//!
//! Translates a map viewport plus attribute filters into a bounded query
//! against `site_selection.global_integrated_power`. Rows without
//! coordinates are excluded in SQL, and the result count and minimum
//! capacity scale with zoom so a continental view never pulls thousands of
//! markers.

use std::fmt::Write as _;

use gridscout_database_models::{PowerPlantRow, ViewportQuery};
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

/// Result cap for a viewport query at the given zoom.
///
/// Policy constants, not derived: coarser zoom gets a smaller cap.
#[must_use]
pub fn zoom_result_cap(zoom: f64) -> u32 {
    if zoom < 5.0 {
        100
    } else if zoom < 8.0 {
        500
    } else {
        2000
    }
}

/// Minimum-capacity floor in MW applied at the given zoom, if any.
///
/// At continental scale only large plants are worth a marker.
#[must_use]
pub fn zoom_capacity_floor(zoom: f64) -> Option<f64> {
    if zoom < 5.0 {
        Some(100.0)
    } else if zoom < 8.0 {
        Some(10.0)
    } else {
        None
    }
}

/// Whether an attribute selection explicitly filters everything out.
///
/// `Some` of an empty list is "return zero results", distinct from `None`,
/// which is "no filter". Such a query is answered without a store round
/// trip.
#[must_use]
pub fn filters_everything(query: &ViewportQuery) -> bool {
    query.types.as_ref().is_some_and(Vec::is_empty)
        || query.statuses.as_ref().is_some_and(Vec::is_empty)
}

/// Queries power plants within the viewport, honoring attribute filters and
/// the zoom policy.
///
/// An explicitly empty type or status selection means "filter everything
/// out" and yields zero rows without a store round trip; `None` means no
/// filter at all.
///
/// # Errors
///
/// Returns [`DbError`] if the store operation fails.
#[allow(clippy::too_many_lines)]
pub async fn query_power_plants(
    db: &dyn Database,
    query: &ViewportQuery,
) -> Result<Vec<PowerPlantRow>, DbError> {
    if filters_everything(query) {
        return Ok(Vec::new());
    }

    let mut sql = String::from(
        "SELECT id, type, country_area, subregion, region, plant_project_name,
                capacity_mw, status, technology, latitude, longitude,
                gem_wiki_url, city, fuel, start_year,
                subnational_unit_state_province
         FROM site_selection.global_integrated_power
         WHERE latitude IS NOT NULL AND longitude IS NOT NULL",
    );

    let mut params: Vec<DatabaseValue> = Vec::new();
    let mut param_idx = 1u32;

    write!(
        sql,
        " AND latitude >= ${} AND latitude <= ${} AND longitude >= ${} AND longitude <= ${}",
        param_idx,
        param_idx + 1,
        param_idx + 2,
        param_idx + 3,
    )
    .unwrap();
    params.push(DatabaseValue::Real64(query.viewport.bounds.south));
    params.push(DatabaseValue::Real64(query.viewport.bounds.north));
    params.push(DatabaseValue::Real64(query.viewport.bounds.west));
    params.push(DatabaseValue::Real64(query.viewport.bounds.east));
    param_idx += 4;

    if let Some(types) = &query.types {
        push_in_clause(&mut sql, &mut params, &mut param_idx, "type", types);
    }

    if let Some(statuses) = &query.statuses {
        push_in_clause(&mut sql, &mut params, &mut param_idx, "status", statuses);
    }

    if query.capacity.has_lower_bound() {
        write!(sql, " AND capacity_mw >= ${param_idx}").unwrap();
        params.push(DatabaseValue::Real64(query.capacity.min));
        param_idx += 1;
    }

    if query.capacity.has_upper_bound() {
        write!(sql, " AND capacity_mw <= ${param_idx}").unwrap();
        params.push(DatabaseValue::Real64(query.capacity.max));
        param_idx += 1;
    }

    if let Some(floor) = zoom_capacity_floor(query.viewport.zoom) {
        write!(sql, " AND capacity_mw >= ${param_idx}").unwrap();
        params.push(DatabaseValue::Real64(floor));
        param_idx += 1;
    }

    write!(sql, " LIMIT ${param_idx}").unwrap();
    params.push(DatabaseValue::Int64(i64::from(zoom_result_cap(
        query.viewport.zoom,
    ))));

    let rows = db.query_raw_params(&sql, &params).await?;

    Ok(rows.iter().map(map_plant_row).collect())
}

/// Appends an `AND <column> IN (...)` clause for a non-empty value list.
fn push_in_clause(
    sql: &mut String,
    params: &mut Vec<DatabaseValue>,
    param_idx: &mut u32,
    column: &str,
    values: &[String],
) {
    write!(sql, " AND {column} IN (").unwrap();
    for (offset, value) in values.iter().enumerate() {
        if offset > 0 {
            sql.push_str(", ");
        }
        write!(sql, "${}", *param_idx).unwrap();
        params.push(DatabaseValue::String(value.clone()));
        *param_idx += 1;
    }
    sql.push(')');
}

fn map_plant_row(row: &switchy_database::Row) -> PowerPlantRow {
    PowerPlantRow {
        id: row.to_value("id").unwrap_or(0),
        plant_type: row.to_value("type").unwrap_or(None),
        country_area: row.to_value("country_area").unwrap_or(None),
        subregion: row.to_value("subregion").unwrap_or(None),
        region: row.to_value("region").unwrap_or(None),
        plant_project_name: row.to_value("plant_project_name").unwrap_or(None),
        capacity_mw: row.to_value("capacity_mw").unwrap_or(None),
        status: row.to_value("status").unwrap_or(None),
        technology: row.to_value("technology").unwrap_or(None),
        latitude: row.to_value("latitude").unwrap_or(None),
        longitude: row.to_value("longitude").unwrap_or(None),
        gem_wiki_url: row.to_value("gem_wiki_url").unwrap_or(None),
        city: row.to_value("city").unwrap_or(None),
        fuel: row.to_value("fuel").unwrap_or(None),
        start_year: row.to_value("start_year").unwrap_or(None),
        subnational_unit_state_province: row
            .to_value("subnational_unit_state_province")
            .unwrap_or(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_cap_scales_with_zoom() {
        assert_eq!(zoom_result_cap(3.0), 100);
        assert_eq!(zoom_result_cap(4.99), 100);
        assert_eq!(zoom_result_cap(5.0), 500);
        assert_eq!(zoom_result_cap(7.9), 500);
        assert_eq!(zoom_result_cap(8.0), 2000);
        assert_eq!(zoom_result_cap(14.0), 2000);
    }

    #[test]
    fn capacity_floor_scales_with_zoom() {
        assert_eq!(zoom_capacity_floor(3.0), Some(100.0));
        assert_eq!(zoom_capacity_floor(6.0), Some(10.0));
        assert_eq!(zoom_capacity_floor(8.0), None);
    }

    #[test]
    fn empty_selection_filters_everything() {
        use gridscout_geography_models::BoundingBox;

        let bounds = BoundingBox::new(-125.0, 24.0, -66.0, 49.0);
        let mut query = ViewportQuery::new(bounds, 8.0);
        assert!(!filters_everything(&query));

        query.types = Some(Vec::new());
        assert!(filters_everything(&query));

        // A non-empty selection is a real filter, not an empty result.
        query.types = Some(vec!["solar".to_string()]);
        assert!(!filters_everything(&query));

        query.statuses = Some(Vec::new());
        assert!(filters_everything(&query));
    }

    #[test]
    fn in_clause_numbering() {
        let mut sql = String::new();
        let mut params = Vec::new();
        let mut idx = 5u32;
        push_in_clause(
            &mut sql,
            &mut params,
            &mut idx,
            "type",
            &["solar".to_string(), "wind".to_string()],
        );
        assert_eq!(sql, " AND type IN ($5, $6)");
        assert_eq!(params.len(), 2);
        assert_eq!(idx, 7);
    }
}
