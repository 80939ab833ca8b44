//! Great-circle distance via the haversine formula.
//!
//! All proximity math in the system runs in statute miles, so the Earth
//! radius constant is miles as well.

use crate::GeoPoint;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance between two points in miles.
///
/// Standard haversine: numerically stable for coincident points (returns
/// exactly `0.0`) and antipodal points (returns half the circumference,
/// never an error).
#[must_use]
pub fn distance_miles(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude().to_radians().cos() * b.latitude().to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn identical_points_are_zero_distance() {
        let p = point(35.7419, -79.5506);
        assert!((distance_miles(&p, &p)).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = point(35.7419, -79.5506);
        let b = point(40.7128, -74.0060);
        let ab = distance_miles(&a, &b);
        let ba = distance_miles(&b, &a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn distance_is_bounded_by_half_circumference() {
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_MILES;
        let pairs = [
            (point(0.0, 0.0), point(0.0, 180.0)),
            (point(90.0, 0.0), point(-90.0, 0.0)),
            (point(35.0, -79.0), point(-35.0, 101.0)),
            (point(12.3, 45.6), point(-12.3, -134.4)),
        ];
        for (a, b) in pairs {
            let d = distance_miles(&a, &b);
            assert!(d >= 0.0);
            assert!(d <= half_circumference + 1e-6, "distance {d} exceeds bound");
        }
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let a = point(0.0, 0.0);
        let b = point(0.0, 180.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_MILES;
        assert!((distance_miles(&a, &b) - half_circumference).abs() < 1.0);
    }

    #[test]
    fn siler_city_to_raleigh_is_about_52_miles() {
        let siler_city = point(35.7419, -79.5506);
        let raleigh = point(35.7796, -78.6382);
        let d = distance_miles(&siler_city, &raleigh);
        assert!((d - 52.0).abs() < 2.0, "expected ~52 mi, got {d}");
    }
}
