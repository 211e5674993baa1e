//! host.rs
//!
//! Whatever the embedding host tells us about the viewer. Nothing here is
//! validated beyond presence; a missing name falls back to a default.

use bevy::log::info;
use bevy::prelude::Resource;

use crate::config::{BANNER_STEP_PX, BANNER_WRAP_PX, DEFAULT_USERNAME};

#[derive(Resource, Debug, Clone, Default)]
pub struct HostContext {
    pub username: Option<String>,
}

impl HostContext {
    pub fn new(username: Option<String>) -> Self {
        Self { username }
    }

    /// Trimmed display name, or the default when the host gave none
    pub fn display_name(&self) -> &str {
        match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => {
                info!("no username from host, using {}", DEFAULT_USERNAME);
                DEFAULT_USERNAME
            }
        }
    }

    pub fn banner_text(&self) -> String {
        format!(
            "* * * WELCOME {} TO THE INTERNATIONAL SPACE STATION TRACKER * * * \
             REAL-TIME SATELLITE POSITIONING SYSTEM * * * CYBERDECK STATUS: ONLINE * * *",
            self.display_name().to_uppercase()
        )
    }
}

/// Horizontal offset of the marquee text, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerScroll {
    pub offset: f32,
}

impl BannerScroll {
    // text enters from the right edge
    pub fn new(window_width: f32) -> Self {
        Self {
            offset: window_width,
        }
    }

    pub fn step(&mut self, window_width: f32) {
        if self.offset < BANNER_WRAP_PX {
            self.offset = window_width;
        } else {
            self.offset -= BANNER_STEP_PX;
        }
    }
}
