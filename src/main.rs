use bevy::log::LogPlugin;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use clap::Parser;

use bevy_isstrack::config::TrackerConfig;
use bevy_isstrack::host::HostContext;
use bevy_isstrack::systems::camera::{OrbitCamPlugin, OrbitCamera};
use bevy_isstrack::systems::clock::ClockPlugin;
use bevy_isstrack::systems::earth::EarthPlugin;
use bevy_isstrack::systems::iss::IssPlugin;
use bevy_isstrack::systems::ui::UIPlugin;

fn main() -> AppExit {
    let config = TrackerConfig::parse();
    let host = HostContext::new(config.username.clone());

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "ISS Tracker".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "info,wgpu=error,naga=warn,bevy_isstrack=debug".into(),
                    ..default()
                }),
        )
        .insert_resource(config)
        .insert_resource(host)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins((ClockPlugin, EarthPlugin, IssPlugin, OrbitCamPlugin, UIPlugin))
        .add_systems(Startup, setup)
        .run()
}

// camera with a black fog so far stars and the back of the globe fade out
fn setup(mut commands: Commands) {
    let orbit = OrbitCamera::new(5.0, 0.4).with_target(Vec3::ZERO);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75f32.to_radians(),
            ..default()
        }),
        Transform::from_translation(orbit.calculate_position()).looking_at(Vec3::ZERO, Vec3::Y),
        DistanceFog {
            color: Color::BLACK,
            falloff: FogFalloff::Linear {
                start: 5.0,
                end: 15.0,
            },
            ..default()
        },
        orbit,
    ));
}
