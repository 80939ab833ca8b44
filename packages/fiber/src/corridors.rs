//! The fixed fiber corridor table.
//!
//! Corridors follow highways (and one rail right-of-way) around the Siler
//! City candidate site. Waypoints are coarse anchors in (lon, lat) order;
//! the directions service fills in the road-following curve for display.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Where a corridor sits in the fiber network hierarchy.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FiberTier {
    /// Local access fiber.
    LastMile,
    /// Regional aggregation fiber.
    MiddleMile,
    /// Backbone fiber.
    LongHaul,
}

/// A static fiber corridor definition.
#[derive(Debug, Clone, Copy)]
pub struct FiberCorridor {
    /// Stable corridor identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Route waypoints in (lon, lat) order.
    pub waypoints: &'static [(f64, f64)],
    /// Display color (hex).
    pub color: &'static str,
    /// Network tier.
    pub tier: FiberTier,
    /// Ownership/access label.
    pub label: &'static str,
}

/// Every corridor rendered on the fiber overlay.
pub const CORRIDORS: &[FiberCorridor] = &[
    // US-64: Ramseur → Siler City → Pittsboro → Apex
    FiberCorridor {
        id: "us-64",
        name: "US-64 County Fiber",
        waypoints: &[
            (-79.8500, 35.7100),
            (-79.5506, 35.7419),
            (-79.0700, 35.7800),
            (-78.9900, 35.7990),
        ],
        color: "#3B82F6",
        tier: FiberTier::LastMile,
        label: "County open access",
    },
    // US-421: Greensboro → Siler City area → RTP
    FiberCorridor {
        id: "us-421",
        name: "US-421 MCNC Fiber",
        waypoints: &[
            (-79.7900, 36.0600),
            (-79.6200, 35.8900),
            (-79.4620, 35.7320),
            (-79.2000, 35.4700),
            (-79.0000, 35.2700),
        ],
        color: "#8B5CF6",
        tier: FiberTier::MiddleMile,
        label: "MCNC middle-mile",
    },
    // Rail right-of-way approximated with nearby roads: Greensboro → Sanford
    FiberCorridor {
        id: "rail-row",
        name: "Norfolk Southern Rail ROW",
        waypoints: &[
            (-79.7900, 36.0700),
            (-79.6000, 35.8000),
            (-79.5400, 35.7300),
            (-79.5230, 35.4100),
        ],
        color: "#10B981",
        tier: FiberTier::LongHaul,
        label: "Zayo long-haul",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn corridor_ids_are_unique() {
        let ids: BTreeSet<&str> = CORRIDORS.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CORRIDORS.len());
    }

    #[test]
    fn corridors_are_routable() {
        for corridor in CORRIDORS {
            assert!(
                corridor.waypoints.len() >= 2,
                "corridor {} needs at least two waypoints",
                corridor.id
            );
        }
    }

    #[test]
    fn waypoints_are_lon_lat_in_the_carolinas() {
        for corridor in CORRIDORS {
            for (lon, lat) in corridor.waypoints {
                assert!((-81.0..=-77.0).contains(lon), "{}: bad lon {lon}", corridor.id);
                assert!((34.0..=37.0).contains(lat), "{}: bad lat {lat}", corridor.id);
            }
        }
    }

    #[test]
    fn tier_serializes_kebab_case() {
        assert_eq!(FiberTier::LastMile.to_string(), "last-mile");
        assert_eq!(FiberTier::MiddleMile.as_ref(), "middle-mile");
        assert_eq!(FiberTier::LongHaul.to_string(), "long-haul");
    }
}
