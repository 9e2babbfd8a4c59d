//! Spatial query utilities for distance calculations.
//!
//! Uses Haversine formula for accurate distances on Earth's surface.

use geo::{HaversineDistance, Point};

/// Build a point from latitude/longitude order (geo stores x = longitude).
pub fn point(lat: f64, lon: f64) -> Point {
    Point::new(lon, lat)
}

/// Finite and inside [-90, 90] x [-180, 180]
pub fn is_valid_point(p: Point) -> bool {
    let (lon, lat) = (p.x(), p.y());
    lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
}

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    p1.haversine_distance(&p2)
}

/// Calculate Haversine distance between two points in kilometers
pub fn haversine_distance_km(p1: Point, p2: Point) -> f64 {
    haversine_distance(p1, p2) / 1000.0
}

/// Mean Earth radius used by `geo`'s haversine, in meters.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle arc of `meters` in degrees of latitude.
pub fn meters_to_degrees_approx(meters: f64) -> f64 {
    (meters / MEAN_EARTH_RADIUS_M).to_degrees()
}

/// Degree-space radius covering every point within `meters` of a point at
/// `latitude`, in both axes.
///
/// Longitude is widened for the most poleward latitude the circle reaches,
/// plus 1% for great circles bowing toward the pole.
pub fn meters_to_lon_degrees_at(meters: f64, latitude: f64) -> f64 {
    let lat_degrees = meters_to_degrees_approx(meters);
    let poleward = (latitude.abs() + lat_degrees).min(90.0);
    lat_degrees / poleward.to_radians().cos().max(0.01) * 1.01
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_haversine_distance() {
        // Madrid to Salamanca is roughly 174 km as the crow flies
        let madrid = point(40.4168, -3.7038);
        let salamanca = point(40.9701, -5.6635);

        let dist = haversine_distance_km(madrid, salamanca);
        assert!((dist - 174.0).abs() < 5.0);
    }

    #[test]
    fn test_distance_symmetry() {
        let a = point(40.970, -5.655);
        let b = point(41.000, -5.700);

        assert_relative_eq!(haversine_distance(a, b), haversine_distance(b, a));
        assert_relative_eq!(haversine_distance(a, a), 0.0);
    }

    #[test]
    fn test_point_validity() {
        assert!(is_valid_point(point(40.97, -5.66)));
        assert!(is_valid_point(point(-90.0, 180.0)));
        assert!(!is_valid_point(point(90.5, 0.0)));
        assert!(!is_valid_point(point(0.0, -180.5)));
        assert!(!is_valid_point(point(f64::NAN, 0.0)));
        assert!(!is_valid_point(point(0.0, f64::INFINITY)));
    }

    #[test]
    fn test_lon_degrees_widen_with_latitude() {
        let at_equator = meters_to_lon_degrees_at(1000.0, 0.0);
        let at_salamanca = meters_to_lon_degrees_at(1000.0, 40.97);

        assert!(at_equator >= meters_to_degrees_approx(1000.0));
        assert!(at_salamanca > at_equator);
    }

    #[test]
    fn test_degree_radius_covers_haversine_circle() {
        for lat in [0.0, 40.97, -60.0, 85.0] {
            let reference = point(lat, 10.0);
            let radius = meters_to_lon_degrees_at(990.0, lat);

            // Due south, just inside 990 m
            let lat_step = meters_to_degrees_approx(989.0);
            assert!(haversine_distance(reference, point(lat - lat_step, 10.0)) < 990.0);
            assert!(lat_step <= radius);

            // Due east, the farthest 0.0001 degree step still inside 990 m
            let mut lon_step = 0.0;
            while haversine_distance(reference, point(lat, 10.0 + lon_step + 0.0001)) < 990.0 {
                lon_step += 0.0001;
            }
            assert!(lon_step <= radius, "lat {lat}: {lon_step} > {radius}");
        }
    }
}
