//! Scene setup - lighting and ground

use bevy::light::CascadeShadowConfigBuilder;
use bevy::prelude::*;

pub struct EnvironmentPlugin;

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_environment);
    }
}

/// Half extent of the shadow-catcher plane under the road
const GROUND_HALF_EXTENT: f32 = 500.0;

/// Farthest distance at which the sun still casts shadows
const SHADOW_RANGE: f32 = 500.0;

/// Setup the basic 3D scene: sun, ambient fill, and ground plane
fn setup_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Dim neutral ambient fill so shadowed sides stay readable
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.25, 0.25, 0.25),
        brightness: 500.0,
        affects_lightmapped_meshes: true,
    });

    // Shadow-casting sun
    commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        CascadeShadowConfigBuilder {
            maximum_distance: SHADOW_RANGE,
            ..default()
        }
        .build(),
        Transform::from_xyz(50.0, 50.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Shadow-catcher plane slightly below the road surface
    let ground_mesh = meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(GROUND_HALF_EXTENT)));
    let ground_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.1, 0.1, 0.1),
        metallic: 0.0,
        perceptual_roughness: 1.0,
        ..default()
    });

    commands.spawn((
        Mesh3d(ground_mesh),
        MeshMaterial3d(ground_material),
        Transform::from_xyz(0.0, -1.0, 0.0),
    ));
}
