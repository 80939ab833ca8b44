//! Composite infrastructure-risk scoring.
//!
//! A deterministic rule table over the nearby-entity set, not a model.
//! Thresholds are strict lower bounds: exactly 1000 MW does not reach
//! Medium, exactly 2000 MW does not reach High.

use gridscout_infra_models::{RiskTier, SiteProjection, is_fossil_fuel};

/// Aggregate inputs and resulting tier for a candidate site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    /// Composite tier.
    pub tier: RiskTier,
    /// Sum of nearby capacity in MW (missing magnitudes count as zero).
    pub total_capacity_mw: f64,
    /// Number of nearby fossil-fuel entities.
    pub fossil_fuel_count: usize,
}

/// Scores a nearby-entity set.
///
/// `capacity > 2000 OR fossil > 3` ⇒ High; `capacity > 1000 OR fossil > 1`
/// ⇒ Medium; otherwise Low. An empty set is Low.
#[must_use]
pub fn assess_risk<T: SiteProjection>(entities: &[T]) -> RiskAssessment {
    let total_capacity_mw: f64 = entities
        .iter()
        .map(|e| e.magnitude_mw().unwrap_or(0.0))
        .sum();

    let fossil_fuel_count = entities
        .iter()
        .filter(|e| e.category().is_some_and(is_fossil_fuel))
        .count();

    let tier = if total_capacity_mw > 2000.0 || fossil_fuel_count > 3 {
        RiskTier::High
    } else if total_capacity_mw > 1000.0 || fossil_fuel_count > 1 {
        RiskTier::Medium
    } else {
        RiskTier::Low
    };

    RiskAssessment {
        tier,
        total_capacity_mw,
        fossil_fuel_count,
    }
}

/// Composite tier alone, when the aggregates are not needed.
#[must_use]
pub fn composite_risk<T: SiteProjection>(entities: &[T]) -> RiskTier {
    assess_risk(entities).tier
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridscout_infra_models::SiteEntity;

    fn entity(capacity_mw: Option<f64>, category: &str) -> SiteEntity {
        SiteEntity {
            location: None,
            magnitude_mw: capacity_mw,
            category: Some(category.to_string()),
        }
    }

    #[test]
    fn empty_set_is_low() {
        let entities: Vec<SiteEntity> = Vec::new();
        let assessment = assess_risk(&entities);
        assert_eq!(assessment.tier, RiskTier::Low);
        assert!(assessment.total_capacity_mw.abs() < f64::EPSILON);
        assert_eq!(assessment.fossil_fuel_count, 0);
    }

    #[test]
    fn heavy_capacity_triggers_high_regardless_of_count() {
        // 2500 MW across four fossil plants.
        let entities = vec![
            entity(Some(1000.0), "coal"),
            entity(Some(600.0), "oil/gas"),
            entity(Some(500.0), "coal"),
            entity(Some(400.0), "oil/gas"),
        ];
        let assessment = assess_risk(&entities);
        assert_eq!(assessment.tier, RiskTier::High);
        assert!((assessment.total_capacity_mw - 2500.0).abs() < f64::EPSILON);
        assert_eq!(assessment.fossil_fuel_count, 4);
    }

    #[test]
    fn fossil_cluster_triggers_high_without_capacity() {
        let entities = vec![
            entity(Some(100.0), "coal"),
            entity(Some(100.0), "coal"),
            entity(Some(100.0), "oil/gas"),
            entity(Some(100.0), "oil/gas"),
        ];
        assert_eq!(composite_risk(&entities), RiskTier::High);
    }

    #[test]
    fn thresholds_are_strict_lower_bounds() {
        // Exactly 1000 MW with one fossil entity: neither Medium trigger
        // fires (count needs > 1, capacity needs > 1000).
        let entities = vec![entity(Some(1000.0), "coal")];
        assert_eq!(composite_risk(&entities), RiskTier::Low);

        // Exactly 2000 MW stays Medium.
        let entities = vec![entity(Some(2000.0), "solar")];
        assert_eq!(composite_risk(&entities), RiskTier::Medium);
    }

    #[test]
    fn two_fossil_entities_reach_medium() {
        let entities = vec![entity(Some(10.0), "coal"), entity(Some(10.0), "oil/gas")];
        assert_eq!(composite_risk(&entities), RiskTier::Medium);
    }

    #[test]
    fn capacity_just_over_threshold_reaches_medium() {
        let entities = vec![entity(Some(1000.1), "solar")];
        assert_eq!(composite_risk(&entities), RiskTier::Medium);
    }

    #[test]
    fn missing_magnitudes_count_as_zero() {
        let entities = vec![entity(None, "wind"), entity(Some(50.0), "solar")];
        let assessment = assess_risk(&entities);
        assert_eq!(assessment.tier, RiskTier::Low);
        assert!((assessment.total_capacity_mw - 50.0).abs() < f64::EPSILON);
    }
}
