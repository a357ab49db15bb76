//! Static test environment: a ground slab, a few obstacles and a sun.

use avian3d::prelude::*;
use bevy::light::light_consts::lux;
use bevy::prelude::*;

use crate::physics::GameLayer;

/// Side length of the square ground slab in meters.
const GROUND_SIZE: f32 = 200.0;

/// Boxes scattered around the spawn point: (center, full extents).
const OBSTACLES: &[(Vec3, Vec3)] = &[
    (Vec3::new(4.0, 0.25, -6.0), Vec3::new(2.0, 0.5, 2.0)),
    (Vec3::new(7.0, 0.5, -9.0), Vec3::new(2.0, 1.0, 2.0)),
    (Vec3::new(-6.0, 1.0, -8.0), Vec3::new(1.0, 2.0, 6.0)),
    (Vec3::new(0.0, 0.15, 8.0), Vec3::new(6.0, 0.3, 1.0)),
];

/// Plugin for the sandbox scene.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene);
    }
}

/// Static collider on the ground layer, checked by the player's probe.
fn ground_body(extents: Vec3) -> impl Bundle {
    (
        RigidBody::Static,
        Collider::cuboid(extents.x, extents.y, extents.z),
        CollisionLayers::new([GameLayer::Ground], [GameLayer::Ground, GameLayer::Player]),
    )
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground slab with its top face at y = 0.
    let ground_extents = Vec3::new(GROUND_SIZE, 1.0, GROUND_SIZE);
    commands.spawn((
        Name::new("Ground"),
        ground_body(ground_extents),
        Mesh3d(meshes.add(Cuboid::from_size(ground_extents))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.45, 0.35),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));

    let obstacle_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.7, 0.55, 0.4),
        ..default()
    });
    for &(center, extents) in OBSTACLES {
        commands.spawn((
            Name::new("Obstacle"),
            ground_body(extents),
            Mesh3d(meshes.add(Cuboid::from_size(extents))),
            MeshMaterial3d(obstacle_material.clone()),
            Transform::from_translation(center),
        ));
    }

    // Ramp for checking that slopes count as ground.
    let ramp_extents = Vec3::new(3.0, 0.2, 8.0);
    commands.spawn((
        Name::new("Ramp"),
        ground_body(ramp_extents),
        Mesh3d(meshes.add(Cuboid::from_size(ramp_extents))),
        MeshMaterial3d(obstacle_material),
        Transform::from_xyz(-12.0, 1.0, 0.0).with_rotation(Quat::from_rotation_x(0.25)),
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: lux::OVERCAST_DAY,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::new(-0.4, 0.0, -0.6), Vec3::Y),
    ));

    tracing::info!(obstacles = OBSTACLES.len(), "Scene setup complete");
}
