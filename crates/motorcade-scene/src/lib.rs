//! 3D showroom for motorcade
//!
//! A static road scene populated with car models: every configured car is
//! parked on the near lane with three mirrored clones on the other lanes,
//! an orbit camera circles the scene, and the digit/arrow keys pick and
//! nudge individual cars.
//!
//! Each concern is its own plugin; [`ShowroomPlugin`] composes them.

use bevy::prelude::*;
use motorcade_core::ShowroomConfig;

pub mod camera;
pub mod driving;
pub mod environment;
pub mod fleet;
pub mod obj;

/// Resource wrapping the showroom configuration
#[derive(Resource, Debug, Clone)]
pub struct ShowroomSettings(pub ShowroomConfig);

/// Plugin that sets up the whole showroom
pub struct ShowroomPlugin;

impl Plugin for ShowroomPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(obj::ObjPlugin)
            .add_plugins(environment::EnvironmentPlugin)
            .add_plugins(camera::CameraPlugin)
            .add_plugins(fleet::FleetPlugin)
            .add_plugins(driving::DrivingPlugin);
    }
}

/// Create a Bevy app configured for the showroom
pub fn create_app(config: ShowroomConfig, primary_window: Window) -> App {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(primary_window),
                ..default()
            })
            .disable::<bevy::log::LogPlugin>(), // The binary initializes tracing itself
    )
    .insert_resource(ShowroomSettings(config))
    .add_plugins(ShowroomPlugin);

    app
}
