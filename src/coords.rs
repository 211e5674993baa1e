//! coords.rs
//!
//! Geographic to scene-space conversion for anything placed on the globe.
//! Scene convention: y is the polar axis, longitude 0 sits 180 degrees
//! around from +x to line up with the globe's meridian.

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in degrees, as reported by the feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    // the mapper accepts anything, this is only used for diagnostics
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Map a geographic position onto a sphere of the given radius.
///
/// phi is measured from the north pole, theta is the longitude shifted by
/// 180 degrees. The result always lies at `radius` from the origin.
pub fn geo_to_cartesian(position: GeoPosition, radius: f64) -> DVec3 {
    let phi = (90.0 - position.latitude).to_radians();
    let theta = (position.longitude + 180.0).to_radians();

    let x = -(phi.sin() * theta.cos()) * radius;
    let y = phi.cos() * radius;
    let z = phi.sin() * theta.sin() * radius;

    DVec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: DVec3, expected: DVec3) {
        assert!(
            (actual - expected).length() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_equator_prime_meridian() {
        let point = geo_to_cartesian(GeoPosition::new(0.0, 0.0), 2.0);
        assert_close(point, DVec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_equator_east() {
        let point = geo_to_cartesian(GeoPosition::new(0.0, 90.0), 2.0);
        assert_close(point, DVec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_poles_ignore_longitude() {
        for longitude in [-180.0, -73.5, 0.0, 45.0, 180.0] {
            let north = geo_to_cartesian(GeoPosition::new(90.0, longitude), 2.0);
            assert!(!north.is_nan());
            assert_close(north, DVec3::new(0.0, 2.0, 0.0));

            let south = geo_to_cartesian(GeoPosition::new(-90.0, longitude), 2.0);
            assert_close(south, DVec3::new(0.0, -2.0, 0.0));
        }
    }

    #[test]
    fn test_points_stay_on_sphere() {
        for radius in [0.5, 1.0, 2.0, 6378.0] {
            let mut latitude = -90.0;
            while latitude <= 90.0 {
                let mut longitude = -180.0;
                while longitude <= 180.0 {
                    let point = geo_to_cartesian(GeoPosition::new(latitude, longitude), radius);
                    assert!((point.length() - radius).abs() < 1e-9 * radius.max(1.0));
                    longitude += 7.5;
                }
                latitude += 7.5;
            }
        }
    }

    #[test]
    fn test_antimeridian_matches() {
        let west = geo_to_cartesian(GeoPosition::new(12.0, -180.0), 2.0);
        let east = geo_to_cartesian(GeoPosition::new(12.0, 180.0), 2.0);
        assert_close(west, east);
    }

    #[test]
    fn test_out_of_range_still_maps() {
        let position = GeoPosition::new(123.0, 400.0);
        assert!(!position.is_in_range());

        let point = geo_to_cartesian(position, 2.0);
        assert!(point.is_finite());
        assert!((point.length() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_idempotent() {
        let position = GeoPosition::new(51.6, -0.12);
        assert_eq!(geo_to_cartesian(position, 2.0), geo_to_cartesian(position, 2.0));
    }

    #[test]
    fn test_range_check() {
        assert!(GeoPosition::new(90.0, -180.0).is_in_range());
        assert!(GeoPosition::new(-90.0, 180.0).is_in_range());
        assert!(!GeoPosition::new(-90.1, 0.0).is_in_range());
        assert!(!GeoPosition::new(0.0, 180.5).is_in_range());
    }
}
