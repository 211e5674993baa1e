use std::time::Duration;

use bevy::prelude::Resource;
use clap::Parser;

// Globe measurements (scene units, earth radius = 1)
pub const EARTH_RADIUS: f32 = 1.0;
pub const GLOW_SCALE: f32 = 1.02;
pub const CLOUD_SCALE: f32 = 1.01;
pub const ISS_ORBIT_RADIUS: f64 = 2.0;
pub const ISS_MARKER_SIZE: f32 = 0.2;

// Axial tilt and meridian alignment of the globe group
pub const AXIAL_TILT_DEG: f32 = 23.4;

// Rotation multipliers per layer, applied to the base earth rotation
pub const EARTH_LAYER_SPEED: f64 = 1.0;
pub const NIGHT_LAYER_SPEED: f64 = 1.0;
pub const GLOW_LAYER_SPEED: f64 = 1.0;
pub const CLOUD_LAYER_SPEED: f64 = 1.15;

// Sun light placement
pub const SUN_DISTANCE: f64 = 50.0;
pub const SUN_HEIGHT: f64 = 30.0;

// Star field
pub const STAR_COUNT: usize = 2000;
pub const STAR_RADIUS: f32 = 100.0;
pub const STAR_DEPTH: f32 = 50.0;

// Position feed
pub const ISS_FEED_URL: &str = "http://api.open-notify.org/iss-now.json";
pub const FEED_USER_AGENT: &str = "bevy-isstrack";
pub const POLL_INTERVAL_SECS: u64 = 5;

// Welcome banner
pub const DEFAULT_USERNAME: &str = "EXPLORER";
pub const BANNER_STEP_PX: f32 = 2.0;
pub const BANNER_STEP_SECS: f32 = 0.03;
pub const BANNER_WRAP_PX: f32 = -1000.0;

/// Runtime settings, overridable from the command line or environment
#[derive(Parser, Resource, Debug, Clone)]
#[command(name = "isstrack", about = "Real-time ISS position over a rotating earth")]
pub struct TrackerConfig {
    /// Position feed endpoint
    #[arg(long, env = "ISS_FEED_URL", default_value = ISS_FEED_URL)]
    pub feed_url: String,

    /// Seconds between position polls
    #[arg(long, env = "ISS_POLL_SECS", default_value_t = POLL_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_secs: u64,

    /// Radius of the sphere the ISS marker is placed on
    #[arg(long, env = "ISS_ORBIT_RADIUS", default_value_t = ISS_ORBIT_RADIUS)]
    pub orbit_radius: f64,

    /// Display name handed over by the host
    #[arg(long, env = "ISS_USERNAME")]
    pub username: Option<String>,
}

impl TrackerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_secs)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            feed_url: ISS_FEED_URL.to_string(),
            poll_secs: POLL_INTERVAL_SECS,
            orbit_radius: ISS_ORBIT_RADIUS,
            username: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = TrackerConfig::default();
        assert_eq!(config.feed_url, ISS_FEED_URL);
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.orbit_radius, 2.0);
        assert!(config.username.is_none());
    }

    // ISS_* variables in the test environment take the place of the defaults
    #[test]
    fn test_defaults_without_args() {
        let config = TrackerConfig::parse_from(["isstrack"]);
        let unset = |name: &str| std::env::var_os(name).is_none();

        if unset("ISS_FEED_URL") {
            assert_eq!(config.feed_url, ISS_FEED_URL);
        }
        if unset("ISS_POLL_SECS") {
            assert_eq!(config.poll_interval(), Duration::from_secs(5));
        }
        if unset("ISS_ORBIT_RADIUS") {
            assert_eq!(config.orbit_radius, 2.0);
        }
        if unset("ISS_USERNAME") {
            assert!(config.username.is_none());
        }
    }

    #[test]
    fn test_overrides() {
        let config = TrackerConfig::parse_from([
            "isstrack",
            "--feed-url",
            "http://localhost:8080/iss-now.json",
            "--poll-secs",
            "10",
            "--orbit-radius",
            "3.5",
            "--username",
            "alice",
        ]);
        assert_eq!(config.feed_url, "http://localhost:8080/iss-now.json");
        assert_eq!(config.poll_secs, 10);
        assert_eq!(config.orbit_radius, 3.5);
        assert_eq!(config.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(TrackerConfig::try_parse_from(["isstrack", "--poll-secs", "0"]).is_err());
    }
}
