//! Radius filtering and distance ranking.

use gridscout_geography_models::GeoPoint;
use gridscout_infra_models::SiteProjection;

/// An entity paired with its distance from the reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked<'a, T> {
    /// The matched entity.
    pub entity: &'a T,
    /// Great-circle distance from the reference point in miles.
    pub distance_miles: f64,
}

/// Filters `entities` to those within `radius_miles` of `reference` and
/// orders them by ascending distance.
///
/// Entities without a usable location are excluded. An entity at exactly
/// the radius is included (`distance <= radius`). Ties keep their input
/// order (the sort is stable), so identical inputs always produce
/// identical output, and a radius change re-ranks the same in-memory
/// collection without refetching.
///
/// A non-finite or negative radius yields an empty result; a radius of
/// zero admits only exact-coincident points.
#[must_use]
pub fn rank_nearby<'a, T: SiteProjection>(
    entities: &'a [T],
    reference: &GeoPoint,
    radius_miles: f64,
) -> Vec<Ranked<'a, T>> {
    if !radius_miles.is_finite() || radius_miles < 0.0 {
        return Vec::new();
    }

    let mut ranked: Vec<Ranked<'a, T>> = entities
        .iter()
        .filter_map(|entity| {
            let location = entity.location()?;
            let distance_miles = reference.distance_miles(&location);
            (distance_miles <= radius_miles).then_some(Ranked {
                entity,
                distance_miles,
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridscout_infra_models::SiteEntity;

    fn reference() -> GeoPoint {
        GeoPoint::new(35.7419, -79.5506).unwrap()
    }

    fn entity(lat: f64, lon: f64) -> SiteEntity {
        SiteEntity {
            location: GeoPoint::new(lat, lon).ok(),
            magnitude_mw: None,
            category: None,
        }
    }

    fn unlocated() -> SiteEntity {
        SiteEntity {
            location: None,
            magnitude_mw: None,
            category: None,
        }
    }

    #[test]
    fn distances_are_non_decreasing() {
        let entities = vec![
            entity(36.2, -78.9),
            entity(35.75, -79.55),
            entity(35.9, -79.2),
            entity(35.7419, -79.5506),
        ];
        let ranked = rank_nearby(&entities, &reference(), 100.0);
        assert_eq!(ranked.len(), 4);
        for pair in ranked.windows(2) {
            assert!(pair[0].distance_miles <= pair[1].distance_miles);
        }
        assert!(ranked[0].distance_miles.abs() < f64::EPSILON);
    }

    #[test]
    fn entities_without_location_are_excluded() {
        let entities = vec![unlocated(), entity(35.75, -79.55), unlocated()];
        let ranked = rank_nearby(&entities, &reference(), 100.0);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let entities: Vec<SiteEntity> = Vec::new();
        assert!(rank_nearby(&entities, &reference(), 50.0).is_empty());
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let raleigh = entity(35.7796, -78.6382);
        let entities = vec![raleigh];
        let exact = reference()
            .distance_miles(&GeoPoint::new(35.7796, -78.6382).unwrap());

        // Exactly at the radius: included.
        let at_radius = rank_nearby(&entities, &reference(), exact);
        assert_eq!(at_radius.len(), 1);
        assert!((at_radius[0].distance_miles - exact).abs() < 1e-6);

        // One epsilon inside the distance: excluded.
        let beyond = rank_nearby(&entities, &reference(), exact - 1e-6);
        assert!(beyond.is_empty());
    }

    #[test]
    fn zero_radius_admits_only_coincident_points() {
        let entities = vec![entity(35.7419, -79.5506), entity(35.742, -79.5506)];
        let ranked = rank_nearby(&entities, &reference(), 0.0);
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].distance_miles.abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_radius_is_a_no_op() {
        let entities = vec![entity(35.75, -79.55)];
        assert!(rank_nearby(&entities, &reference(), f64::NAN).is_empty());
        assert!(rank_nearby(&entities, &reference(), -1.0).is_empty());
    }

    #[test]
    fn ties_preserve_input_order() {
        // Same coordinates, distinguishable by category.
        let mut a = entity(35.9, -79.2);
        a.category = Some("first".to_string());
        let mut b = entity(35.9, -79.2);
        b.category = Some("second".to_string());

        let entities = vec![a, b];
        let ranked = rank_nearby(&entities, &reference(), 100.0);
        assert_eq!(ranked[0].entity.category.as_deref(), Some("first"));
        assert_eq!(ranked[1].entity.category.as_deref(), Some("second"));
    }

    #[test]
    fn reranking_is_deterministic() {
        let entities = vec![
            entity(36.2, -78.9),
            entity(35.75, -79.55),
            entity(35.9, -79.2),
        ];
        let first: Vec<f64> = rank_nearby(&entities, &reference(), 100.0)
            .iter()
            .map(|r| r.distance_miles)
            .collect();
        let second: Vec<f64> = rank_nearby(&entities, &reference(), 100.0)
            .iter()
            .map(|r| r.distance_miles)
            .collect();
        assert_eq!(first, second);
    }
}
