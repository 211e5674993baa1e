use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

// touchpads report pixels, wheels report lines
const PIXELS_PER_LINE: f32 = 100.0;

pub struct OrbitCamPlugin;

impl Plugin for OrbitCamPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update);
    }
}

// camera component
#[derive(Component, Debug)]
pub struct OrbitCamera {
    pub radius: f32,
    pub speed: f32,
    pub zoom_speed: f32,
    pub angle: f32,
    pub v_angle: f32,
    pub is_dragging: bool,
    pub target: Vec3,

    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius: 5.0,
            speed: 0.4,
            zoom_speed: 0.6,
            // looking down -z from +z, same as a camera at (0, 0, 5)
            angle: std::f32::consts::FRAC_PI_2,
            v_angle: 0.0,
            is_dragging: false,
            target: Vec3::ZERO,

            // never inside the globe, never past the fog
            min_radius: 1.5,
            max_radius: 15.0,
        }
    }
}

impl OrbitCamera {
    pub fn new(radius: f32, speed: f32) -> Self {
        Self {
            radius,
            speed,
            ..default()
        }
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn with_zoom_limits(mut self, min_radius: f32, max_radius: f32) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self.radius = self.radius.clamp(min_radius, max_radius);
        self
    }

    // calculate world position from spherical coordinates
    // https://en.wikipedia.org/wiki/Spherical_coordinate_system#Cartesian_coordinates
    pub fn calculate_position(&self) -> Vec3 {
        let x = self.radius * self.v_angle.cos() * self.angle.cos();
        let y = self.radius * self.v_angle.sin();
        let z = self.radius * self.v_angle.cos() * self.angle.sin();

        self.target + Vec3::new(x, y, z)
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.angle += delta.x * self.speed * 0.01;
        self.v_angle = (self.v_angle + delta.y * self.speed * 0.01).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.radius = (self.radius - scroll * self.zoom_speed).clamp(self.min_radius, self.max_radius);
    }
}

fn update(
    mut camera_query: Query<(&mut Transform, &mut OrbitCamera)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<CursorMoved>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let motion: Vec2 = mouse_motion.read().filter_map(|motion| motion.delta).sum();
    let scroll: f32 = scroll_events.read().map(scroll_lines).sum();

    for (mut transform, mut camera) in camera_query.iter_mut() {
        // handle mouse drag
        if mouse_buttons.just_pressed(MouseButton::Right) || mouse_buttons.just_pressed(MouseButton::Left) {
            camera.is_dragging = true;
        }
        if !mouse_buttons.pressed(MouseButton::Right) && !mouse_buttons.pressed(MouseButton::Left) {
            camera.is_dragging = false;
        }

        if camera.is_dragging {
            camera.rotate(motion);
        }
        camera.zoom(scroll);

        // update camera position/orientation
        transform.translation = camera.calculate_position();
        transform.look_at(camera.target, Vec3::Y);
    }
}

// scroll amount in wheel lines, whatever the device reports
fn scroll_lines(event: &MouseWheel) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => event.y,
        MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
    }
}
