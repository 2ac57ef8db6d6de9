// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance between two positions.

use geo::Point;

/// Earth mean radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance in meters between two points given as
/// (x = longitude, y = latitude) in degrees.
pub fn haversine_meters(a: Point<f64>, b: Point<f64>) -> f64 {
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();
    let dlat = lat2 - lat1;
    let dlng = (b.x() - a.x()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> Point<f64> {
        Point::new(lng, lat)
    }

    #[test]
    fn test_same_point_is_zero() {
        let toronto = pt(43.6532, -79.3832);
        assert_eq!(haversine_meters(toronto, toronto), 0.0);
    }

    #[test]
    fn test_one_degree_latitude() {
        let d = haversine_meters(pt(43.0, -79.0), pt(44.0, -79.0));
        let expected = 111_195.0;
        assert!(
            (d - expected).abs() / expected < 0.01,
            "1 degree of latitude should be ~111km, got {}",
            d
        );
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            (pt(43.646769, -79.6359934), pt(44.3017312, -79.6823509)),
            (pt(-33.8688, 151.2093), pt(51.5074, -0.1278)),
            (pt(0.0, 179.9), pt(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            assert!((haversine_meters(a, b) - haversine_meters(b, a)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_antipodes_are_half_circumference() {
        let d = haversine_meters(pt(0.0, 0.0), pt(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((d - half).abs() < 1.0);
    }

    #[test]
    fn test_nearby_dealerships() {
        // 401 Kia and Dixie Mitsubishi are a short drive apart
        let d = haversine_meters(pt(43.646769, -79.6359934), pt(43.6444388, -79.6442699));
        assert!(d > 500.0 && d < 1000.0, "got {}", d);
    }
}
