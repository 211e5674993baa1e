//! rotation.rs
//!
//! Earth rotation and sun placement derived from an explicit UTC instant.
//! One UTC day maps onto exactly one revolution.

use std::f64::consts::TAU;

use bevy::math::DVec3;
use chrono::{DateTime, Timelike, Utc};

use crate::config::{SUN_DISTANCE, SUN_HEIGHT};

const PER_HOUR: f64 = TAU / 24.0;
const PER_MINUTE: f64 = TAU / (24.0 * 60.0);
const PER_SECOND: f64 = TAU / (24.0 * 60.0 * 60.0);

/// Rotation of the globe in radians since the start of the UTC day, in [0, 2π)
pub fn earth_rotation(now: DateTime<Utc>) -> f64 {
    now.hour() as f64 * PER_HOUR
        + now.minute() as f64 * PER_MINUTE
        + now.second() as f64 * PER_SECOND
}

// layers like clouds spin at a multiple of the base angle
pub fn layer_rotation(base: f64, multiplier: f64) -> f64 {
    base * multiplier
}

/// Directional light position, swinging around with the UTC hour
pub fn sun_position(now: DateTime<Utc>) -> DVec3 {
    let hour_angle = now.hour() as f64 / 24.0 * TAU;

    DVec3::new(
        hour_angle.cos() * SUN_DISTANCE,
        hour_angle.sin() * SUN_DISTANCE,
        SUN_HEIGHT,
    )
}
