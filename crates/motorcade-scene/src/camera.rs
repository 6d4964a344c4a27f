//! Orbit camera
//!
//! The camera circles a fixed target: dragging with the left mouse button
//! feeds an angular velocity that decays each frame, so rotation eases out
//! instead of stopping dead. The polar angle is clamped to the upper
//! hemisphere - the camera never dips below the ground plane.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::ShowroomSettings;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<CameraAction>::default())
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (orbit_input, apply_orbit).chain());
    }
}

/// Actions for camera control
#[derive(Actionlike, PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect)]
pub enum CameraAction {
    Orbit,
}

/// Vertical field of view (radians)
const FOV: f32 = 45.0 * std::f32::consts::PI / 180.0;
const NEAR_PLANE: f32 = 1.0;
const FAR_PLANE: f32 = 2000.0;

/// Rotation applied per pixel of mouse drag (radians)
const ROTATE_SENSITIVITY: f32 = 0.005;

/// Fraction of the radius travelled per scroll line
const ZOOM_STEP: f32 = 0.1;

/// Lowest allowed elevation: level with the target, never below it
const MIN_PITCH: f32 = 0.0;

/// Highest allowed elevation: just short of straight overhead
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Component holding the orbit state
#[derive(Component, Debug)]
pub struct OrbitCamera {
    /// Point the camera circles and looks at
    pub target: Vec3,
    /// Distance from the target
    pub radius: f32,
    /// Horizontal angle around the target (radians)
    pub yaw: f32,
    /// Elevation above the target's horizontal plane (radians)
    pub pitch: f32,
    /// Pending yaw change, decayed by `damping` each frame
    pub yaw_velocity: f32,
    /// Pending pitch change, decayed by `damping` each frame
    pub pitch_velocity: f32,
    /// Per-frame velocity decay factor, in `0..1`
    pub damping: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

/// Offset of the eye from the target for the given orbit angles.
pub fn orbit_offset(yaw: f32, pitch: f32, radius: f32) -> Vec3 {
    Vec3::new(
        pitch.cos() * yaw.sin(),
        pitch.sin(),
        pitch.cos() * yaw.cos(),
    ) * radius
}

/// Setup the camera at the configured eye position
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters must be passed by value
fn setup_camera(mut commands: Commands, settings: Res<ShowroomSettings>) {
    let tuning = &settings.0.camera;

    let offset = tuning.eye - tuning.target;
    let radius = offset
        .length()
        .clamp(tuning.min_radius, tuning.max_radius);
    let yaw = offset.x.atan2(offset.z);
    let pitch = (offset.y / radius).asin().clamp(MIN_PITCH, MAX_PITCH);

    let input_map = InputMap::default().with(CameraAction::Orbit, MouseButton::Left);

    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.02, 0.03, 0.05)),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: FOV,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        Transform::from_translation(tuning.target + orbit_offset(yaw, pitch, radius))
            .looking_at(tuning.target, Vec3::Y),
        OrbitCamera {
            target: tuning.target,
            radius,
            yaw,
            pitch,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            damping: tuning.damping,
            min_radius: tuning.min_radius,
            max_radius: tuning.max_radius,
        },
        input_map,
    ));
}

/// Feed mouse drag into the orbit velocities, wheel into the radius
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters must be passed by value
fn orbit_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut query: Query<(&mut OrbitCamera, &ActionState<CameraAction>)>,
) {
    for motion in mouse_motion.read() {
        for (mut camera, action_state) in &mut query {
            if !action_state.pressed(&CameraAction::Orbit) {
                continue;
            }
            camera.yaw_velocity -= motion.delta.x * ROTATE_SENSITIVITY;
            camera.pitch_velocity += motion.delta.y * ROTATE_SENSITIVITY;
        }
    }

    for wheel in mouse_wheel.read() {
        let lines = match wheel.unit {
            MouseScrollUnit::Line => wheel.y,
            MouseScrollUnit::Pixel => wheel.y / 50.0,
        };
        for (mut camera, _) in &mut query {
            let next = camera.radius * (1.0 - lines * ZOOM_STEP);
            camera.radius = next.clamp(camera.min_radius, camera.max_radius);
        }
    }
}

/// Integrate the damped orbit state and reposition the camera
fn apply_orbit(mut query: Query<(&mut Transform, &mut OrbitCamera)>) {
    for (mut transform, mut camera) in &mut query {
        let yaw_step = camera.yaw_velocity;
        let pitch_step = camera.pitch_velocity;
        camera.yaw += yaw_step;
        camera.pitch = (camera.pitch + pitch_step).clamp(MIN_PITCH, MAX_PITCH);

        let decay = 1.0 - camera.damping;
        camera.yaw_velocity *= decay;
        camera.pitch_velocity *= decay;

        transform.translation = camera.target + orbit_offset(camera.yaw, camera.pitch, camera.radius);
        transform.look_at(camera.target, Vec3::Y);
    }
}
