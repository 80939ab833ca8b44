//! Normalization of free-form store strings.
//!
//! Datacenter rows store capacity as prose ("up to 300 MW", "1,200MW
//! planned") and status with inconsistent casing. The enhanced store view
//! normalizes these server-side; this module is the local equivalent for
//! base-table reads.

use std::sync::LazyLock;

use regex::Regex;

static CAPACITY_MW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:mw|megawatts?)").expect("valid regex")
});

/// Parses a free-form power capacity string into MW.
///
/// Takes the first number carrying an MW unit; a bare numeric string is
/// accepted as already being MW. Anything else is `None`.
#[must_use]
pub fn parse_capacity_mw(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(captures) = CAPACITY_MW.captures(raw) {
        let number = captures[1].replace(',', "");
        return number.parse::<f64>().ok().filter(|v| v.is_finite());
    }

    raw.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Normalizes a free-form status string (trim + lowercase).
#[must_use]
pub fn normalize_status(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unit_suffixed_capacities() {
        assert_eq!(parse_capacity_mw("300 MW"), Some(300.0));
        assert_eq!(parse_capacity_mw("up to 300 MW"), Some(300.0));
        assert_eq!(parse_capacity_mw("1,200MW planned"), Some(1200.0));
        assert_eq!(parse_capacity_mw("49.9 megawatts"), Some(49.9));
    }

    #[test]
    fn parses_bare_numbers() {
        assert_eq!(parse_capacity_mw("450"), Some(450.0));
        assert_eq!(parse_capacity_mw(" 12.5 "), Some(12.5));
    }

    #[test]
    fn skips_numbers_without_units_when_prose_follows() {
        // "2 x 150 MW": the unit-bearing number wins.
        assert_eq!(parse_capacity_mw("2 x 150 MW"), Some(150.0));
    }

    #[test]
    fn rejects_unparseable_strings() {
        assert_eq!(parse_capacity_mw(""), None);
        assert_eq!(parse_capacity_mw("TBD"), None);
        assert_eq!(parse_capacity_mw("unknown capacity"), None);
    }

    #[test]
    fn normalizes_status_strings() {
        assert_eq!(normalize_status("  Under Construction "), "under construction");
        assert_eq!(normalize_status("OPERATIONAL"), "operational");
    }
}
