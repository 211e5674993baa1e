//! iss.rs
//!
//! ISS marker plus the background poller feeding it. The poller runs on its
//! own small tokio runtime; both live in the `IssFeed` resource, so removing
//! the resource stops the timer and drops any request still in flight.

use bevy::prelude::*;
use tokio::runtime::{Builder, Runtime};

use crate::config::{ISS_MARKER_SIZE, TrackerConfig};
use crate::feed::OpenNotifyClient;
use crate::poller::{PositionFix, PositionPoller};

pub struct IssPlugin;

impl Plugin for IssPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrackerConfig>()
           .init_resource::<LatestFix>()
           .add_systems(Startup, (spawn_marker, start_feed))
           .add_systems(Update, apply_latest_fix)
           .add_systems(Last, stop_feed_on_exit);
    }
}

// marker tag
#[derive(Component)]
pub struct IssMarker;

/// Latest fix applied to the marker, for the UI readout
#[derive(Resource, Default, Debug, Clone)]
pub struct LatestFix(pub Option<PositionFix>);

// field order matters: the poller must drop before its runtime
#[derive(Resource)]
pub struct IssFeed {
    poller: PositionPoller,
    _runtime: Runtime,
}

impl IssFeed {
    pub fn latest(&self) -> Option<PositionFix> {
        self.poller.latest()
    }
}

fn spawn_marker(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<TrackerConfig>,
) {
    // sits on the equator at the prime meridian until the first fix lands
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_length(ISS_MARKER_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(config.orbit_radius as f32, 0.0, 0.0),
        IssMarker,
    ));
}

fn start_feed(mut commands: Commands, config: Res<TrackerConfig>) {
    let runtime = match Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("iss-feed")
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start feed runtime, ISS will not move: {}", e);
            return;
        }
    };

    let poller = {
        let _guard = runtime.enter();
        PositionPoller::spawn(
            OpenNotifyClient::new(config.feed_url.clone()),
            config.poll_interval(),
            config.orbit_radius,
        )
    };

    info!("Tracking ISS from {}", config.feed_url);
    commands.insert_resource(IssFeed {
        poller,
        _runtime: runtime,
    });
}

// move the marker when a newer fix has been published
fn apply_latest_fix(
    feed: Option<Res<IssFeed>>,
    mut latest: ResMut<LatestFix>,
    mut marker_query: Query<&mut Transform, With<IssMarker>>,
) {
    let Some(fix) = feed.and_then(|feed| feed.latest()) else { return; };

    let applied = latest.0.as_ref().map(|f| f.seq);
    if applied == Some(fix.seq) {
        return;
    }

    for mut transform in marker_query.iter_mut() {
        transform.translation = fix.point.as_vec3();
    }

    debug!(
        "ISS at {:.4}, {:.4}",
        fix.report.position.latitude, fix.report.position.longitude
    );
    latest.0 = Some(fix);
}

fn stop_feed_on_exit(mut commands: Commands, mut exit_events: EventReader<AppExit>) {
    if exit_events.read().next().is_some() {
        info!("Stopping ISS feed");
        commands.remove_resource::<IssFeed>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::coords::{GeoPosition, geo_to_cartesian};
    use crate::feed::{IssReport, PositionSource};

    struct FixedSource(GeoPosition);

    impl PositionSource for FixedSource {
        async fn fetch(&self) -> crate::error::Result<IssReport> {
            Ok(IssReport {
                position: self.0,
                timestamp: None,
                message: None,
            })
        }
    }

    fn feed_with(source: FixedSource) -> IssFeed {
        let runtime = Builder::new_current_thread().enable_all().build().unwrap();
        let poller = {
            let _guard = runtime.enter();
            PositionPoller::spawn(source, Duration::from_secs(60), 2.0)
        };

        // drive the runtime until the immediate first poll lands
        let mut rx = poller.subscribe();
        runtime
            .block_on(async { rx.wait_for(|fix| fix.is_some()).await.map(|_| ()) })
            .unwrap();

        IssFeed {
            poller,
            _runtime: runtime,
        }
    }

    #[test]
    fn test_marker_moves_to_fix() {
        let position = GeoPosition::new(51.5, -0.1);
        let feed = feed_with(FixedSource(position));
        assert!(feed.latest().is_some());

        let mut app = App::new();
        app.init_resource::<LatestFix>()
           .insert_resource(feed)
           .add_systems(Update, apply_latest_fix);

        let marker = app
            .world_mut()
            .spawn((IssMarker, Transform::from_xyz(2.0, 0.0, 0.0)))
            .id();

        app.update();

        let expected = geo_to_cartesian(position, 2.0).as_vec3();
        let transform = app.world().get::<Transform>(marker).unwrap();
        assert!((transform.translation - expected).length() < 1e-5);
        assert_eq!(
            app.world().resource::<LatestFix>().0.as_ref().map(|f| f.seq),
            Some(1)
        );

        // dropping the feed shuts the poller and runtime down
        app.world_mut().remove_resource::<IssFeed>();
    }

    #[test]
    fn test_marker_waits_without_feed() {
        let mut app = App::new();
        app.init_resource::<LatestFix>()
           .add_systems(Update, apply_latest_fix);

        let marker = app
            .world_mut()
            .spawn((IssMarker, Transform::from_xyz(2.0, 0.0, 0.0)))
            .id();

        app.update();

        let transform = app.world().get::<Transform>(marker).unwrap();
        assert_eq!(transform.translation, Vec3::new(2.0, 0.0, 0.0));
        assert!(app.world().resource::<LatestFix>().0.is_none());
    }
}
