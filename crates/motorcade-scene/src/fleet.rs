//! Fleet loading and scene population
//!
//! Spawns the configured cars and the road at startup. Asset loads are
//! asynchronous and unordered: each car is registered the moment its scene
//! instance finishes spawning, so the registry's index order follows load
//! completion, not configuration order. Once a car is ready, three clones
//! of it are mirrored onto the other lanes; clones are scenery only and
//! never appear in the registry.

use bevy::asset::AssetLoadFailedEvent;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;
use tracing::{error, info};

use motorcade_core::config::CarPlacement;
use motorcade_core::{clone_poses, primary_translation};

use crate::ShowroomSettings;

pub struct FleetPlugin;

impl Plugin for FleetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CarRegistry>()
            .add_message::<CarSpawned>()
            .add_systems(Startup, spawn_fleet)
            .add_systems(
                Update,
                (
                    register_ready_cars,
                    isolate_materials,
                    log_ready_cars,
                    report_load_failures,
                ),
            );
    }
}

/// Ordered list of selectable car entities.
///
/// Entries are appended as scene instances become ready, so index `i` is
/// the i-th car to finish loading - on a slow disk or network that may not
/// be the i-th configured car.
#[derive(Resource, Debug, Default)]
pub struct CarRegistry {
    cars: Vec<Entity>,
}

impl CarRegistry {
    /// The car at `index`, or `None` if that many cars have not loaded yet.
    pub fn get(&self, index: usize) -> Option<Entity> {
        self.cars.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    pub(crate) fn push(&mut self, entity: Entity) {
        self.cars.push(entity);
    }
}

/// Marker for a selectable primary car instance
#[derive(Component)]
pub struct CarBody;

/// Marker for a mirrored clone; scenery only
#[derive(Component)]
pub struct CarClone;

/// Marker for the road surface
#[derive(Component)]
pub struct RoadSurface;

/// Marker for any spawned model root; meshes underneath get their own
/// material copies
#[derive(Component)]
pub struct ModelRoot;

/// Placement parameters kept on the primary instance for clone replication
#[derive(Component, Debug, Clone)]
pub struct Placement(pub CarPlacement);

/// Message emitted when a car's scene instance has fully spawned
#[derive(Debug)]
pub struct CarSpawned {
    pub entity: Entity,
    pub name: String,
}

impl Message for CarSpawned {}

/// Kick off every configured asset load and place the roots
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters must be passed by value
fn spawn_fleet(
    mut commands: Commands,
    settings: Res<ShowroomSettings>,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for placement in &settings.0.cars {
        let scene: Handle<Scene> =
            asset_server.load(GltfAssetLabel::Scene(0).from_asset(placement.asset.clone()));
        commands.spawn((
            SceneRoot(scene),
            Transform::from_translation(primary_translation(placement))
                .with_scale(Vec3::splat(placement.scale)),
            CarBody,
            ModelRoot,
            Placement(placement.clone()),
        ));
    }

    // The road is a single mesh in its own format, laid flat; no clones,
    // no registry entry.
    let road = &settings.0.road;
    let road_mesh: Handle<Mesh> = asset_server.load(road.asset.clone());
    let road_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.35, 0.38),
        metallic: 0.0,
        perceptual_roughness: 0.9,
        ..default()
    });
    commands.spawn((
        Mesh3d(road_mesh),
        MeshMaterial3d(road_material),
        Transform::IDENTITY
            .with_rotation(Quat::from_rotation_x(-FRAC_PI_2))
            .with_scale(Vec3::splat(road.scale)),
        RoadSurface,
        ModelRoot,
    ));
}

/// Register cars whose scene instance finished spawning and mirror their
/// clones onto the other lanes.
///
/// The scene spawner attaches a ready instance as children of the root
/// entity, so `Added<Children>` fires exactly once per car, in load
/// completion order.
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters must be passed by value
fn register_ready_cars(
    mut commands: Commands,
    mut registry: ResMut<CarRegistry>,
    mut spawned: MessageWriter<CarSpawned>,
    ready: Query<(Entity, &Placement, &SceneRoot), (With<CarBody>, Added<Children>)>,
) {
    for (entity, placement, scene) in &ready {
        registry.push(entity);

        for (yaw, translation) in clone_poses(&placement.0) {
            commands.spawn((
                SceneRoot(scene.0.clone()),
                Transform::from_translation(translation)
                    .with_rotation(Quat::from_rotation_y(yaw))
                    .with_scale(Vec3::splat(placement.0.scale)),
                CarClone,
                ModelRoot,
            ));
        }

        spawned.write(CarSpawned {
            entity,
            name: placement.0.name.clone(),
        });
    }
}

/// Give every mesh under a model root its own copy of its material, forced
/// opaque so it writes depth. Repainting one instance later can then never
/// bleed into its clones, the other cars, or the shared asset.
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters must be passed by value
fn isolate_materials(
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut fresh: Query<
        (Entity, &mut MeshMaterial3d<StandardMaterial>),
        Added<MeshMaterial3d<StandardMaterial>>,
    >,
    parents: Query<&ChildOf>,
    roots: Query<(), With<ModelRoot>>,
) {
    for (entity, mut material) in &mut fresh {
        if !under_model_root(entity, &parents, &roots) {
            continue;
        }
        let Some(source) = materials.get(&material.0) else {
            continue;
        };
        let mut owned = source.clone();
        owned.alpha_mode = AlphaMode::Opaque;
        material.0 = materials.add(owned);
    }
}

fn under_model_root(
    entity: Entity,
    parents: &Query<&ChildOf>,
    roots: &Query<(), With<ModelRoot>>,
) -> bool {
    let mut current = entity;
    loop {
        if roots.contains(current) {
            return true;
        }
        match parents.get(current) {
            Ok(child_of) => current = child_of.parent(),
            Err(_) => return false,
        }
    }
}

/// Report load completions (the completion-callback analog)
fn log_ready_cars(mut spawned: MessageReader<CarSpawned>) {
    for message in spawned.read() {
        info!("{} loaded", message.name);
    }
}

/// A failed asset is logged and forgotten; the rest of the fleet is
/// unaffected.
fn report_load_failures(
    mut scene_failures: MessageReader<AssetLoadFailedEvent<Scene>>,
    mut mesh_failures: MessageReader<AssetLoadFailedEvent<Mesh>>,
) {
    for failure in scene_failures.read() {
        error!("Error loading car model {}: {}", failure.path, failure.error);
    }
    for failure in mesh_failures.read() {
        error!("Error loading road model {}: {}", failure.path, failure.error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn placement(name: &str, counter: f32, vertical_offset: f32) -> CarPlacement {
        CarPlacement {
            name: name.to_string(),
            asset: format!("models/{name}/scene.gltf"),
            scale: 2.0,
            vertical_offset,
            counter,
        }
    }

    fn registry_app() -> App {
        let mut app = App::new();
        app.init_resource::<CarRegistry>()
            .add_message::<CarSpawned>()
            .add_systems(Update, register_ready_cars);
        app
    }

    fn spawn_car(app: &mut App, placement: CarPlacement) -> Entity {
        let transform = Transform::from_translation(primary_translation(&placement))
            .with_scale(Vec3::splat(placement.scale));
        app.world_mut()
            .spawn((
                SceneRoot(Handle::default()),
                transform,
                CarBody,
                ModelRoot,
                Placement(placement),
            ))
            .id()
    }

    /// Simulate the scene spawner attaching the loaded instance
    fn mark_ready(app: &mut App, car: Entity) {
        let child = app.world_mut().spawn_empty().id();
        app.world_mut().entity_mut(car).add_child(child);
    }

    fn clone_transforms(app: &mut App) -> Vec<Transform> {
        let mut query = app
            .world_mut()
            .query_filtered::<&Transform, With<CarClone>>();
        query.iter(app.world()).copied().collect()
    }

    #[test]
    fn test_registry_follows_completion_order() {
        let mut app = registry_app();
        let first = spawn_car(&mut app, placement("first", 0.0, 0.0));
        let second = spawn_car(&mut app, placement("second", 15.0, 0.0));

        app.update();
        assert!(app.world().resource::<CarRegistry>().is_empty());

        // The second configured car finishes loading first
        mark_ready(&mut app, second);
        app.update();
        mark_ready(&mut app, first);
        app.update();

        let registry = app.world().resource::<CarRegistry>();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0), Some(second));
        assert_eq!(registry.get(1), Some(first));
        assert_eq!(registry.get(2), None);
    }

    #[test]
    fn test_ready_car_spawns_three_clones() {
        let mut app = registry_app();
        let car = spawn_car(&mut app, placement("boxster", 30.0, 3.9));
        mark_ready(&mut app, car);
        app.update();

        let clones = clone_transforms(&mut app);
        assert_eq!(clones.len(), 3);

        let expected = [
            (PI, Vec3::new(30.0, 3.9, 90.0)),
            (FRAC_PI_2, Vec3::new(-90.0, 3.9, 30.0)),
            (-FRAC_PI_2, Vec3::new(90.0, 3.9, -30.0)),
        ];
        for ((yaw, translation), clone) in expected.iter().zip(&clones) {
            assert_eq!(clone.translation, *translation);
            assert_eq!(clone.rotation, Quat::from_rotation_y(*yaw));
            assert_eq!(clone.scale, Vec3::splat(2.0));
        }
    }

    #[test]
    fn test_clones_are_never_registered() {
        let mut app = registry_app();
        let car = spawn_car(&mut app, placement("shelby", 0.0, 0.0));
        mark_ready(&mut app, car);
        app.update();
        // Extra frames after the clones spawned
        app.update();
        app.update();

        assert_eq!(app.world().resource::<CarRegistry>().len(), 1);
        assert_eq!(app.world().resource::<CarRegistry>().get(0), Some(car));
    }

    #[test]
    fn test_full_fleet_yields_four_instances_per_car() {
        let mut app = registry_app();
        let cars: Vec<Entity> = [
            ("shelby", 0.0),
            ("porsche", 15.0),
            ("boxster", 30.0),
            ("civic", 45.0),
            ("focus", 60.0),
        ]
        .into_iter()
        .map(|(name, counter)| spawn_car(&mut app, placement(name, counter, 0.0)))
        .collect();

        for car in &cars {
            mark_ready(&mut app, *car);
        }
        app.update();

        let registry = app.world().resource::<CarRegistry>();
        assert_eq!(registry.len(), 5);
        for car in &cars {
            assert!((0..5).any(|i| registry.get(i) == Some(*car)));
        }

        // One primary and three clones per configured car
        assert_eq!(clone_transforms(&mut app).len(), 15);
        let mut primaries = app.world_mut().query_filtered::<(), With<CarBody>>();
        assert_eq!(primaries.iter(app.world()).count(), 5);
    }

    #[test]
    fn test_readiness_fires_once_per_car() {
        let mut app = registry_app();
        let car = spawn_car(&mut app, placement("civic", 45.0, 0.0));
        mark_ready(&mut app, car);
        app.update();
        app.update();

        assert_eq!(app.world().resource::<CarRegistry>().len(), 1);
        assert_eq!(clone_transforms(&mut app).len(), 3);
    }

    #[test]
    fn test_materials_are_isolated_per_mesh() {
        let mut app = App::new();
        app.insert_resource(Assets::<StandardMaterial>::default())
            .add_systems(Update, isolate_materials);

        let shared = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                base_color: Color::srgb(0.8, 0.1, 0.1),
                alpha_mode: AlphaMode::Blend,
                ..default()
            });

        let root = app.world_mut().spawn(ModelRoot).id();
        let left = app
            .world_mut()
            .spawn(MeshMaterial3d(shared.clone()))
            .id();
        let right = app
            .world_mut()
            .spawn(MeshMaterial3d(shared.clone()))
            .id();
        app.world_mut().entity_mut(root).add_child(left);
        app.world_mut().entity_mut(root).add_child(right);

        // A mesh outside any model root keeps its shared material
        let outsider = app
            .world_mut()
            .spawn(MeshMaterial3d(shared.clone()))
            .id();

        app.update();

        let left_handle = app.world().get::<MeshMaterial3d<StandardMaterial>>(left).unwrap().0.clone();
        let right_handle = app.world().get::<MeshMaterial3d<StandardMaterial>>(right).unwrap().0.clone();
        let outsider_handle = app.world().get::<MeshMaterial3d<StandardMaterial>>(outsider).unwrap().0.clone();

        assert_ne!(left_handle, shared);
        assert_ne!(right_handle, shared);
        assert_ne!(left_handle, right_handle);
        assert_eq!(outsider_handle, shared);

        let materials = app.world().resource::<Assets<StandardMaterial>>();
        let owned = materials.get(&left_handle).unwrap();
        assert_eq!(owned.alpha_mode, AlphaMode::Opaque);
        assert_eq!(owned.base_color, Color::srgb(0.8, 0.1, 0.1));
    }
}
