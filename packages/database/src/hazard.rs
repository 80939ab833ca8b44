//! County hazard lookups with graceful state-level fallback.
//!
//! Hazard data is "better than nothing" even when county-level precision is
//! unavailable, so a miss on (state, county) broadens to a state-only match
//! before giving up. The two outcomes are distinguished so the caller can
//! label a fallback match as lower-confidence.

use gridscout_database_models::HazardRow;
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

/// How a hazard row was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchConfidence {
    /// Matched on both state and county substrings.
    County,
    /// County match failed (or no county was known); first state-level row.
    StateFallback,
}

/// A matched hazard row with its confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardMatch {
    /// The matched row.
    pub row: HazardRow,
    /// Whether this was a county-precise or state-fallback match.
    pub confidence: MatchConfidence,
}

const HAZARD_COLUMNS: &str = "state, stateabbrv, county, countytype, nri_id,
     population, buildvalue, agrivalue, area,
     risk_value, risk_score, risk_ratng, risk_spctl,
     eal_score, eal_ratng, eal_spctl,
     sovi_score, sovi_ratng, sovi_spctl,
     resl_score, resl_ratng, resl_spctl,
     rfld_riskr, cfld_riskr, erqk_riskr, hrcn_riskr, trnd_riskr,
     wfir_riskr, drgt_riskr, hwav_riskr, lnds_riskr, wntw_riskr,
     avln_riskr, cwav_riskr, hail_riskr, isth_riskr, ltng_riskr,
     swnd_riskr, tsun_riskr, vlcn_riskr";

/// Finds the best-matching hazard row for a resolved region.
///
/// Case-insensitive substring match on state, narrowed by county when one
/// is known (a placeholder "Unknown" county does not narrow). Returns
/// `Ok(None)` when the region has no hazard data at all, a distinct
/// outcome from a failed lookup.
///
/// # Errors
///
/// Returns [`DbError`] if a store operation fails.
pub async fn lookup_hazard(
    db: &dyn Database,
    state: &str,
    county: Option<&str>,
) -> Result<Option<HazardMatch>, DbError> {
    let state = state.trim();
    if state.is_empty() {
        return Ok(None);
    }

    if let Some(county) = usable_county(county) {
        let sql = format!(
            "SELECT {HAZARD_COLUMNS}
             FROM site_selection.nri_counties
             WHERE state ILIKE $1 AND county ILIKE $2
             LIMIT 5"
        );
        let rows = db
            .query_raw_params(
                &sql,
                &[
                    DatabaseValue::String(format!("%{state}%")),
                    DatabaseValue::String(format!("%{county}%")),
                ],
            )
            .await?;

        if let Some(row) = rows.first() {
            return Ok(Some(HazardMatch {
                row: map_hazard_row(row),
                confidence: phase_confidence(true),
            }));
        }

        log::debug!("No county-level hazard match for {county}, {state}; broadening to state");
    }

    let sql = format!(
        "SELECT {HAZARD_COLUMNS}
         FROM site_selection.nri_counties
         WHERE state ILIKE $1
         LIMIT 1"
    );
    let rows = db
        .query_raw_params(&sql, &[DatabaseValue::String(format!("%{state}%"))])
        .await?;

    Ok(rows.first().map(|row| HazardMatch {
        row: map_hazard_row(row),
        confidence: phase_confidence(false),
    }))
}

/// A county string usable for narrowing: non-empty and not the geocoder's
/// "Unknown" placeholder.
fn usable_county(county: Option<&str>) -> Option<&str> {
    county
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != "Unknown")
}

/// Confidence assigned to a hit from each lookup phase.
const fn phase_confidence(county_narrowed: bool) -> MatchConfidence {
    if county_narrowed {
        MatchConfidence::County
    } else {
        MatchConfidence::StateFallback
    }
}

#[allow(clippy::too_many_lines)]
fn map_hazard_row(row: &switchy_database::Row) -> HazardRow {
    HazardRow {
        state: row.to_value("state").unwrap_or(None),
        stateabbrv: row.to_value("stateabbrv").unwrap_or(None),
        county: row.to_value("county").unwrap_or(None),
        countytype: row.to_value("countytype").unwrap_or(None),
        nri_id: row.to_value("nri_id").unwrap_or(None),
        population: row.to_value("population").unwrap_or(None),
        buildvalue: row.to_value("buildvalue").unwrap_or(None),
        agrivalue: row.to_value("agrivalue").unwrap_or(None),
        area: row.to_value("area").unwrap_or(None),
        risk_value: row.to_value("risk_value").unwrap_or(None),
        risk_score: row.to_value("risk_score").unwrap_or(None),
        risk_ratng: row.to_value("risk_ratng").unwrap_or(None),
        risk_spctl: row.to_value("risk_spctl").unwrap_or(None),
        eal_score: row.to_value("eal_score").unwrap_or(None),
        eal_ratng: row.to_value("eal_ratng").unwrap_or(None),
        eal_spctl: row.to_value("eal_spctl").unwrap_or(None),
        sovi_score: row.to_value("sovi_score").unwrap_or(None),
        sovi_ratng: row.to_value("sovi_ratng").unwrap_or(None),
        sovi_spctl: row.to_value("sovi_spctl").unwrap_or(None),
        resl_score: row.to_value("resl_score").unwrap_or(None),
        resl_ratng: row.to_value("resl_ratng").unwrap_or(None),
        resl_spctl: row.to_value("resl_spctl").unwrap_or(None),
        rfld_riskr: row.to_value("rfld_riskr").unwrap_or(None),
        cfld_riskr: row.to_value("cfld_riskr").unwrap_or(None),
        erqk_riskr: row.to_value("erqk_riskr").unwrap_or(None),
        hrcn_riskr: row.to_value("hrcn_riskr").unwrap_or(None),
        trnd_riskr: row.to_value("trnd_riskr").unwrap_or(None),
        wfir_riskr: row.to_value("wfir_riskr").unwrap_or(None),
        drgt_riskr: row.to_value("drgt_riskr").unwrap_or(None),
        hwav_riskr: row.to_value("hwav_riskr").unwrap_or(None),
        lnds_riskr: row.to_value("lnds_riskr").unwrap_or(None),
        wntw_riskr: row.to_value("wntw_riskr").unwrap_or(None),
        avln_riskr: row.to_value("avln_riskr").unwrap_or(None),
        cwav_riskr: row.to_value("cwav_riskr").unwrap_or(None),
        hail_riskr: row.to_value("hail_riskr").unwrap_or(None),
        isth_riskr: row.to_value("isth_riskr").unwrap_or(None),
        ltng_riskr: row.to_value("ltng_riskr").unwrap_or(None),
        swnd_riskr: row.to_value("swnd_riskr").unwrap_or(None),
        tsun_riskr: row.to_value("tsun_riskr").unwrap_or(None),
        vlcn_riskr: row.to_value("vlcn_riskr").unwrap_or(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_or_blank_counties_do_not_narrow() {
        assert_eq!(usable_county(Some("Chatham")), Some("Chatham"));
        assert_eq!(usable_county(Some(" Chatham ")), Some("Chatham"));
        assert_eq!(usable_county(Some("Unknown")), None);
        assert_eq!(usable_county(Some("")), None);
        assert_eq!(usable_county(None), None);
    }

    #[test]
    fn state_phase_hit_is_flagged_as_fallback() {
        // The county-level phase found nothing; the state-level row that
        // answers instead carries the lower-confidence marker.
        let row = HazardRow {
            state: Some("North Carolina".to_string()),
            county: Some("Alamance".to_string()),
            ..HazardRow::default()
        };
        let matched = HazardMatch {
            row,
            confidence: phase_confidence(false),
        };
        assert_eq!(matched.confidence, MatchConfidence::StateFallback);
    }

    #[test]
    fn county_phase_hit_is_full_confidence() {
        assert_eq!(phase_confidence(true), MatchConfidence::County);
    }
}
