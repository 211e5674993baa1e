//! earth.rs
//!
//! Stylized globe: line graticules for the earth and night lights, an
//! additive glow shell and a faster cloud layer. Every layer's spin is
//! recomputed from the clock each frame, never accumulated.

use std::f32::consts::PI;

use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;
use rand::Rng;

use crate::config::{
    AXIAL_TILT_DEG, CLOUD_LAYER_SPEED, CLOUD_SCALE, EARTH_LAYER_SPEED, EARTH_RADIUS,
    GLOW_LAYER_SPEED, GLOW_SCALE, NIGHT_LAYER_SPEED, STAR_COUNT, STAR_DEPTH, STAR_RADIUS,
};
use crate::coords::{GeoPosition, geo_to_cartesian};
use crate::rotation::{earth_rotation, layer_rotation, sun_position};
use crate::systems::clock::UtcClock;

pub struct EarthPlugin;

impl Plugin for EarthPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 100.0,
                ..default()
            })
           .add_systems(Startup, (start, spawn_stars))
           .add_systems(Update, (rotate_layers, follow_sun));
    }
}

// tilted parent of all the spinning layers
#[derive(Component)]
pub struct Globe;

/// A layer that spins at `multiplier` times the earth's rate
#[derive(Component, Debug, Clone, Copy)]
pub struct RotatingLayer {
    pub multiplier: f64,
}

// sun tag
#[derive(Component)]
pub struct Sun;

fn start(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // 180 degrees around y to face the prime meridian, then tilt the axis
    let globe = commands
        .spawn((
            Globe,
            Transform::from_rotation(Quat::from_euler(
                EulerRot::XYZ,
                0.0,
                PI,
                -AXIAL_TILT_DEG.to_radians(),
            )),
            Visibility::default(),
        ))
        .id();

    // earth grid
    let earth_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.0, 1.0, 0.0),
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(graticule_mesh(EARTH_RADIUS, 15.0, 0.0))),
        MeshMaterial3d(earth_material),
        Transform::default(),
        RotatingLayer { multiplier: EARTH_LAYER_SPEED },
        ChildOf(globe),
    ));

    // night lights, a denser faint grid
    let night_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.0, 1.0, 1.0, 0.3),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(graticule_mesh(EARTH_RADIUS, 5.0, 2.5))),
        MeshMaterial3d(night_material),
        Transform::default(),
        RotatingLayer { multiplier: NIGHT_LAYER_SPEED },
        ChildOf(globe),
    ));

    // atmosphere glow
    let glow_mesh = Sphere::new(EARTH_RADIUS).mesh().ico(6);
    match glow_mesh {
        Ok(mesh) => {
            commands.spawn((
                Mesh3d(meshes.add(mesh)),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgba(0.0, 0.25, 0.25, 1.0),
                    alpha_mode: AlphaMode::Add,
                    unlit: true,
                    ..default()
                })),
                Transform::from_scale(Vec3::splat(GLOW_SCALE)),
                RotatingLayer { multiplier: GLOW_LAYER_SPEED },
                ChildOf(globe),
            ));
        }
        Err(e) => error!("Failed to build glow mesh: {:?}", e),
    }

    // clouds drift slightly faster than the ground
    commands.spawn((
        Mesh3d(meshes.add(graticule_mesh(EARTH_RADIUS, 30.0, 7.5))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.15),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(CLOUD_SCALE)),
        RotatingLayer { multiplier: CLOUD_LAYER_SPEED },
        ChildOf(globe),
    ));

    // sun light, moved every frame
    commands.spawn((
        DirectionalLight {
            illuminance: 2_000.,
            ..default()
        },
        Transform::from_xyz(50.0, 0.0, 30.0).looking_at(Vec3::ZERO, Vec3::Y),
        Sun,
    ));
}

fn spawn_stars(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::rng();
    let mut positions = Vec::with_capacity(STAR_COUNT);

    // uniform directions, distance somewhere in the shell
    for _ in 0..STAR_COUNT {
        let y: f32 = rng.random_range(-1.0..1.0);
        let angle: f32 = rng.random_range(0.0..std::f32::consts::TAU);
        let ring = (1.0 - y * y).sqrt();
        let distance = STAR_RADIUS + rng.random_range(0.0..STAR_DEPTH);

        positions.push([
            ring * angle.cos() * distance,
            y * distance,
            ring * angle.sin() * distance,
        ]);
    }

    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::default(),
    ));
}

// set (not add) each layer's spin from the current time
fn rotate_layers(
    clock: Res<UtcClock>,
    mut layers: Query<(&RotatingLayer, &mut Transform)>,
) {
    let base = earth_rotation(clock.now);

    for (layer, mut transform) in layers.iter_mut() {
        let angle = layer_rotation(base, layer.multiplier) as f32;
        transform.rotation = Quat::from_rotation_y(angle);
    }
}

fn follow_sun(
    clock: Res<UtcClock>,
    mut sun_query: Query<&mut Transform, With<Sun>>,
) {
    let position = sun_position(clock.now).as_vec3();

    if let Ok(mut transform) = sun_query.single_mut() {
        *transform = Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y);
    }
}

/// Line mesh of meridians and parallels every `step` degrees, shifted by
/// `offset` degrees. Points go through the same mapping as the ISS so the
/// grid and the marker agree on where places are.
pub fn graticule_mesh(radius: f32, step: f64, offset: f64) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let segments = 64;

    let mut push_line = |points: Vec<Vec3>, closed: bool| {
        let start = positions.len() as u32;
        let count = points.len() as u32;

        for point in &points {
            positions.push([point.x, point.y, point.z]);
        }

        let segment_count = if closed { count } else { count - 1 };
        for i in 0..segment_count {
            let next_i = (i + 1) % count; // wrap
            indices.push(start + i);
            indices.push(start + next_i);
        }
    };

    // meridians, pole to pole
    let mut longitude = -180.0 + offset;
    while longitude < 180.0 {
        let points: Vec<Vec3> = (0..=segments)
            .map(|i| {
                let latitude = -90.0 + 180.0 * i as f64 / segments as f64;
                point_at(latitude, longitude, radius)
            })
            .collect();
        push_line(points, false);
        longitude += step;
    }

    // parallels, skipping the poles
    let mut latitude = -90.0 + step + offset;
    while latitude < 90.0 {
        let points: Vec<Vec3> = (0..segments)
            .map(|i| {
                let longitude = -180.0 + 360.0 * i as f64 / segments as f64;
                point_at(latitude, longitude, radius)
            })
            .collect();
        push_line(points, true);
        latitude += step;
    }

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_indices(Indices::U32(indices));

    mesh
}

fn point_at(latitude: f64, longitude: f64, radius: f32) -> Vec3 {
    geo_to_cartesian(GeoPosition::new(latitude, longitude), radius as f64).as_vec3()
}
