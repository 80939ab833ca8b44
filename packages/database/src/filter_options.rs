//! Filter option discovery.
//!
//! The type/status filter panels are driven by the distinct values present
//! in the store. When discovery fails, callers fall back to the common
//! value sets so the panels still render.

use moosicbox_json_utils::database::ToValue as _;
use switchy_database::Database;

use crate::DbError;

/// The plant types commonly present in the store.
pub const DEFAULT_TYPES: &[&str] = &[
    "bioenergy",
    "coal",
    "geothermal",
    "hydropower",
    "nuclear",
    "oil/gas",
    "solar",
    "wind",
];

/// The plant statuses commonly present in the store.
pub const DEFAULT_STATUSES: &[&str] = &[
    "announced",
    "cancelled",
    "construction",
    "operating",
    "permitted",
    "planned",
    "retired",
    "shelved",
];

/// Available attribute filter values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    /// Distinct plant types, sorted.
    pub types: Vec<String>,
    /// Distinct plant statuses, sorted.
    pub statuses: Vec<String>,
}

impl FilterOptions {
    /// The static fallback used when discovery fails.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            types: DEFAULT_TYPES.iter().map(ToString::to_string).collect(),
            statuses: DEFAULT_STATUSES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Discovers the distinct type and status values present in the store.
///
/// # Errors
///
/// Returns [`DbError`] if a store operation fails.
pub async fn fetch_filter_options(db: &dyn Database) -> Result<FilterOptions, DbError> {
    let type_rows = db
        .query_raw_params(
            "SELECT DISTINCT type FROM site_selection.global_integrated_power
             WHERE type IS NOT NULL AND type != ''
             ORDER BY type",
            &[],
        )
        .await?;

    let status_rows = db
        .query_raw_params(
            "SELECT DISTINCT status FROM site_selection.global_integrated_power
             WHERE status IS NOT NULL AND status != ''
             ORDER BY status",
            &[],
        )
        .await?;

    let types = type_rows
        .iter()
        .filter_map(|row| {
            let value: String = row.to_value("type").unwrap_or_default();
            (!value.is_empty()).then_some(value)
        })
        .collect();

    let statuses = status_rows
        .iter()
        .filter_map(|row| {
            let value: String = row.to_value("status").unwrap_or_default();
            (!value.is_empty()).then_some(value)
        })
        .collect();

    Ok(FilterOptions { types, statuses })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sorted_and_nonempty() {
        let options = FilterOptions::defaults();
        assert_eq!(options.types.len(), 8);
        assert_eq!(options.statuses.len(), 8);
        assert!(options.types.windows(2).all(|w| w[0] <= w[1]));
        assert!(options.statuses.windows(2).all(|w| w[0] <= w[1]));
    }
}
