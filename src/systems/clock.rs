//! clock.rs
//!
//! Wall clock resource. Systems read the current instant from here instead of
//! asking the OS, so tests can pin it.

use bevy::prelude::*;
use chrono::{DateTime, Utc};

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(UtcClock::default())
           .add_systems(First, tick);
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct UtcClock {
    pub now: DateTime<Utc>,
}

impl Default for UtcClock {
    fn default() -> Self {
        Self { now: Utc::now() }
    }
}

impl UtcClock {
    pub fn fixed(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

fn tick(mut clock: ResMut<UtcClock>) {
    clock.now = Utc::now();
}
