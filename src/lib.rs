//! Real-time ISS position over a rotating earth.
//!
//! The math and polling live at the top level so they can be used without a
//! window; `systems` wires them into Bevy.

pub mod config;
pub mod coords;
pub mod error;
pub mod feed;
pub mod host;
pub mod metadata;
pub mod poller;
pub mod rotation;
pub mod systems;

pub use coords::{GeoPosition, geo_to_cartesian};
pub use error::{FeedError, Result};
pub use feed::{IssReport, OpenNotifyClient, PositionSource};
pub use poller::{PositionFix, PositionPoller};
pub use rotation::{earth_rotation, layer_rotation, sun_position};
