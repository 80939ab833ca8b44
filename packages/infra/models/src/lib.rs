#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Infrastructure entity taxonomy and classification rules.
//!
//! Power plants, datacenter locations, and transmission lines share the
//! spatial and scoring logic through the [`SiteProjection`] trait: a
//! nullable location, a nullable magnitude in MW, and a free-form category
//! string (fuel, type, or status depending on the entity kind). Per-kind
//! fields stay on the row types; this crate only knows the projection and
//! the pure classification rules applied to it.

use gridscout_geography_models::GeoPoint;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Display tier derived from an entity's free-form status string.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusTier {
    /// In service.
    Operational,
    /// Construction-like phases (construction, ground broken, site work).
    UnderConstruction,
    /// Announced or planned.
    Planned,
    /// Partially in service.
    PartiallyOperational,
    /// Anything else.
    Unknown,
}

impl StatusTier {
    /// Classifies a raw status string by case-insensitive substring match.
    ///
    /// "Partially" is checked before "operational" so that a status like
    /// "Partially Operational" lands in its own tier instead of the full
    /// operational one.
    #[must_use]
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        if status.contains("partially") {
            Self::PartiallyOperational
        } else if status.contains("operational") || status.contains("operating") {
            Self::Operational
        } else if status.contains("construction")
            || status.contains("ground broken")
            || status.contains("site work")
        {
            Self::UnderConstruction
        } else if status.contains("planned") || status.contains("announced") {
            Self::Planned
        } else {
            Self::Unknown
        }
    }
}

/// Environmental-impact tier derived from a fuel/type string.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactTier {
    /// Coal and oil/gas generation.
    HighImpact,
    /// Solar and wind generation.
    LowImpact,
    /// Everything else (nuclear, hydro, bioenergy, geothermal, ...).
    Neutral,
}

impl ImpactTier {
    /// Classifies a raw fuel/type string.
    #[must_use]
    pub fn classify(fuel_or_type: &str) -> Self {
        match fuel_or_type.trim().to_lowercase().as_str() {
            "coal" | "oil/gas" => Self::HighImpact,
            "solar" | "wind" => Self::LowImpact,
            _ => Self::Neutral,
        }
    }
}

/// Composite infrastructure-risk tier for a candidate site.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    /// Little nearby generation, no fossil concentration.
    Low,
    /// Moderate nearby capacity or more than one fossil plant.
    Medium,
    /// Heavy nearby capacity or a fossil cluster.
    High,
}

/// Whether a fuel/type string counts as fossil generation.
///
/// Substring match, unlike [`ImpactTier::classify`]'s exact match: the
/// composite risk count treats "Coal / Biomass" as fossil even though its
/// display tier is neutral.
#[must_use]
pub fn is_fossil_fuel(fuel_or_type: &str) -> bool {
    let fuel = fuel_or_type.to_lowercase();
    fuel.contains("coal") || fuel.contains("oil/gas")
}

/// The common projection shared by every infrastructure entity kind.
///
/// `location` is `None` for rows lacking usable coordinates; such entities
/// are invisible to every radius and bounding-box computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntity {
    /// Validated coordinates, if the row has any.
    pub location: Option<GeoPoint>,
    /// Capacity in MW, if known.
    pub magnitude_mw: Option<f64>,
    /// Fuel/type/status category string, if known.
    pub category: Option<String>,
}

/// Access to the shared spatial/classification projection.
pub trait SiteProjection {
    /// Validated coordinates, if any.
    fn location(&self) -> Option<GeoPoint>;

    /// Capacity in MW, if known.
    fn magnitude_mw(&self) -> Option<f64>;

    /// Fuel/type/status category string, if known.
    fn category(&self) -> Option<&str>;
}

impl<T: SiteProjection + ?Sized> SiteProjection for &T {
    fn location(&self) -> Option<GeoPoint> {
        (**self).location()
    }

    fn magnitude_mw(&self) -> Option<f64> {
        (**self).magnitude_mw()
    }

    fn category(&self) -> Option<&str> {
        (**self).category()
    }
}

impl SiteProjection for SiteEntity {
    fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    fn magnitude_mw(&self) -> Option<f64> {
        self.magnitude_mw
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification_vocabulary() {
        assert_eq!(StatusTier::classify("Operational"), StatusTier::Operational);
        assert_eq!(StatusTier::classify("operating"), StatusTier::Operational);
        assert_eq!(
            StatusTier::classify("Under Construction"),
            StatusTier::UnderConstruction
        );
        assert_eq!(
            StatusTier::classify("Ground Broken on Phase 2"),
            StatusTier::UnderConstruction
        );
        assert_eq!(
            StatusTier::classify("Site Work Started"),
            StatusTier::UnderConstruction
        );
        assert_eq!(StatusTier::classify("Planned"), StatusTier::Planned);
        assert_eq!(StatusTier::classify("announced"), StatusTier::Planned);
        assert_eq!(StatusTier::classify("retired"), StatusTier::Unknown);
        assert_eq!(StatusTier::classify(""), StatusTier::Unknown);
    }

    #[test]
    fn partially_operational_is_its_own_tier() {
        assert_eq!(
            StatusTier::classify("Partially Operational"),
            StatusTier::PartiallyOperational
        );
    }

    #[test]
    fn impact_classification_is_exact_match() {
        assert_eq!(ImpactTier::classify("coal"), ImpactTier::HighImpact);
        assert_eq!(ImpactTier::classify("Oil/Gas"), ImpactTier::HighImpact);
        assert_eq!(ImpactTier::classify("solar"), ImpactTier::LowImpact);
        assert_eq!(ImpactTier::classify(" Wind "), ImpactTier::LowImpact);
        assert_eq!(ImpactTier::classify("nuclear"), ImpactTier::Neutral);
        assert_eq!(ImpactTier::classify("coal ash"), ImpactTier::Neutral);
    }

    #[test]
    fn fossil_predicate_is_substring_match() {
        assert!(is_fossil_fuel("coal"));
        assert!(is_fossil_fuel("Oil/Gas"));
        assert!(is_fossil_fuel("Coal / Biomass"));
        assert!(!is_fossil_fuel("solar"));
        assert!(!is_fossil_fuel("oil shale")); // no "oil/gas" substring
    }

    #[test]
    fn tiers_serialize_screaming_snake() {
        assert_eq!(StatusTier::UnderConstruction.to_string(), "UNDER_CONSTRUCTION");
        assert_eq!(ImpactTier::HighImpact.as_ref(), "HIGH_IMPACT");
        assert_eq!(RiskTier::Medium.to_string(), "MEDIUM");
    }
}
