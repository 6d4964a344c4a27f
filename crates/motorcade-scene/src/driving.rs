//! Car selection and movement
//!
//! Two independent keyboard concerns: the digit keys pick a car by its
//! position in load order, and the arrow keys nudge whichever car is
//! currently selected along its lane. Selecting a slot whose car has not
//! finished loading simply makes the arrows do nothing.

use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use tracing::info;

use crate::ShowroomSettings;
use crate::fleet::{CarBody, CarRegistry};

pub struct DrivingPlugin;

impl Plugin for DrivingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<DriveAction>::default())
            .init_resource::<SelectedCar>()
            .add_systems(Startup, setup_driver_controls)
            .add_systems(Update, (select_car, drive_selected_car));
    }
}

/// Actions for car interaction
#[derive(Actionlike, PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect)]
pub enum DriveAction {
    SelectCar1,
    SelectCar2,
    SelectCar3,
    SelectCar4,
    SelectCar5,
    Forward,
    Backward,
}

impl DriveAction {
    /// Digit actions in selection order
    const SELECTORS: [Self; 5] = [
        Self::SelectCar1,
        Self::SelectCar2,
        Self::SelectCar3,
        Self::SelectCar4,
        Self::SelectCar5,
    ];
}

/// Index into the car registry chosen by the digit keys.
///
/// Not bounds-checked against the registry: the index may point at a slot
/// that has not loaded yet.
#[derive(Resource, Debug, Default, PartialEq, Eq)]
pub struct SelectedCar {
    pub index: usize,
}

/// Marker for the entity carrying the driving input map
#[derive(Component)]
pub struct DriverControls;

fn setup_driver_controls(mut commands: Commands) {
    let input_map = InputMap::new([
        (DriveAction::SelectCar1, KeyCode::Digit1),
        (DriveAction::SelectCar2, KeyCode::Digit2),
        (DriveAction::SelectCar3, KeyCode::Digit3),
        (DriveAction::SelectCar4, KeyCode::Digit4),
        (DriveAction::SelectCar5, KeyCode::Digit5),
        (DriveAction::Forward, KeyCode::ArrowUp),
        (DriveAction::Backward, KeyCode::ArrowDown),
    ]);

    commands.spawn((DriverControls, input_map));
}

/// Digit keys pick a car, unconditionally overwriting the prior selection
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters must be passed by value
fn select_car(
    mut selected: ResMut<SelectedCar>,
    query: Query<&ActionState<DriveAction>, With<DriverControls>>,
) {
    for action_state in &query {
        for (index, action) in DriveAction::SELECTORS.iter().enumerate() {
            if action_state.just_pressed(action) {
                selected.index = index;
                info!("Car {} selected", index + 1);
            }
        }
    }
}

/// Arrow keys move the selected car along its lane by one fixed step
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters must be passed by value
fn drive_selected_car(
    settings: Res<ShowroomSettings>,
    selected: Res<SelectedCar>,
    registry: Res<CarRegistry>,
    input: Query<&ActionState<DriveAction>, With<DriverControls>>,
    mut cars: Query<&mut Transform, With<CarBody>>,
) {
    let Some(entity) = registry.get(selected.index) else {
        return;
    };

    let speed = settings.0.drive.movement_speed;
    for action_state in &input {
        let mut step = 0.0;
        if action_state.just_pressed(&DriveAction::Forward) {
            step -= speed;
        }
        if action_state.just_pressed(&DriveAction::Backward) {
            step += speed;
        }
        if step != 0.0 {
            if let Ok(mut transform) = cars.get_mut(entity) {
                transform.translation.z += step;
            }
        }
    }
}
