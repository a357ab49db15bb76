//! First-person player: spawning and the two controller hooks.
//!
//! The frame hook runs in `RunFixedMainLoopSystems::BeforeFixedMainLoop`, so
//! it always precedes the fixed steps of the same frame. The physics hook runs
//! in `FixedUpdate`, ahead of Avian's solver in `FixedPostUpdate`.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::window::CursorOptions;
use leafwing_input_manager::prelude::*;
use upright_fps::{ControllerConfig, FirstPersonController, PlayerRig};

use crate::{
    input::{
        ActionInput, NeutralInput, PlayerAction, WindowCursor, default_player_input_map, is_grabbed,
    },
    launch_params::LaunchParams,
    physics::{AvianBody, AvianOverlap, GameLayer},
};

/// Capsule radius in meters.
const CAPSULE_RADIUS: f32 = 0.5;
/// Capsule segment length in meters (total height is this plus two radii).
const CAPSULE_LENGTH: f32 = 1.0;
/// Camera height above the capsule center.
const EYE_HEIGHT: f32 = 0.6;
/// Where the ground probe sits below the capsule center.
const PROBE_DEPTH: f32 = CAPSULE_RADIUS + CAPSULE_LENGTH * 0.5;
/// Spawn height of the capsule center.
const SPAWN_HEIGHT: f32 = 3.0;
/// Player mass in kg; jump impulses are divided by this.
const PLAYER_MASS: f32 = 1.0;

/// Plugin for the first-person player.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_player, setup_player_controller).chain())
            .add_systems(
                RunFixedMainLoop,
                player_frame_update.in_set(RunFixedMainLoopSystems::BeforeFixedMainLoop),
            )
            .add_systems(FixedUpdate, player_physics_step);
    }
}

// ============================================================================
// Components
// ============================================================================

/// Marker component for the player's rigid body.
#[derive(Component)]
pub struct Player;

/// Marker component for the camera child that receives pitch.
#[derive(Component)]
pub struct PlayerCamera;

/// Marker component for the ground check point below the capsule.
#[derive(Component)]
pub struct GroundCheck;

/// The controller driving this player.
#[derive(Component)]
pub struct PlayerController(pub FirstPersonController);

/// Entities the controller needs besides the body itself.
#[derive(Component, Debug)]
pub struct PlayerRigLinks {
    pub camera: Entity,
    pub ground_probe: Entity,
}

// ============================================================================
// Setup
// ============================================================================

/// Spawn the player capsule with its camera and ground probe children.
fn spawn_player(mut commands: Commands, params: Res<LaunchParams>) {
    let config = ControllerConfig {
        ground_mask: GameLayer::Ground.controller_mask(),
        ..params.controller.clone()
    };

    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            PlayerController(FirstPersonController::new(config)),
            RigidBody::Dynamic,
            Collider::capsule(CAPSULE_RADIUS, CAPSULE_LENGTH),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
            Mass(PLAYER_MASS),
            Transform::from_xyz(0.0, SPAWN_HEIGHT, 0.0),
            default_player_input_map(),
            ActionState::<PlayerAction>::default(),
        ))
        .id();

    let camera = commands
        .spawn((
            Name::new("Player camera"),
            PlayerCamera,
            Camera3d::default(),
            Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
            ChildOf(player),
        ))
        .id();

    let ground_probe = commands
        .spawn((
            Name::new("Ground check"),
            GroundCheck,
            Transform::from_xyz(0.0, -PROBE_DEPTH, 0.0),
            ChildOf(player),
        ))
        .id();

    commands.entity(player).insert(PlayerRigLinks {
        camera,
        ground_probe,
    });

    tracing::info!(?player, "Player spawned - WASD to move, mouse to look, Space to jump");
}

/// Setup phase: check every handle resolves, then capture the cursor.
fn setup_player_controller(
    player_query: Query<(&PlayerController, &PlayerRigLinks)>,
    camera_query: Query<&Transform, With<PlayerCamera>>,
    probe_query: Query<&Transform, With<GroundCheck>>,
    window: Single<(&mut Window, &mut CursorOptions)>,
) -> Result {
    let (mut window, mut cursor) = window.into_inner();

    for (controller, links) in &player_query {
        let resolved = PlayerRig::builder::<(), (), Quat, Vec3>()
            .body(())
            .transform(())
            .camera(camera_query.get(links.camera).ok().map(|t| t.rotation))
            .ground_probe(probe_query.get(links.ground_probe).ok().map(|t| t.translation))
            .build();
        if let Err(err) = resolved {
            tracing::error!(?links, "{err}");
            return Err(err.into());
        }

        controller.0.setup(&mut WindowCursor {
            cursor: &mut cursor,
            window: &mut window,
        });
    }

    Ok(())
}

// ============================================================================
// Hooks
// ============================================================================

/// Frame hook: ground check, input, look and jump.
#[allow(clippy::type_complexity)]
fn player_frame_update(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    cursor: Single<&CursorOptions>,
    mut player_query: Query<
        (
            Entity,
            &mut PlayerController,
            &PlayerRigLinks,
            &ActionState<PlayerAction>,
            &Position,
            &mut Rotation,
            &mut Transform,
            &mut LinearVelocity,
            &mut AngularVelocity,
            &ComputedMass,
        ),
        With<Player>,
    >,
    mut camera_query: Query<&mut Transform, (With<PlayerCamera>, Without<Player>)>,
    probe_query: Query<
        &Transform,
        (With<GroundCheck>, Without<Player>, Without<PlayerCamera>),
    >,
) -> Result {
    let dt = time.delta_secs();
    let grabbed = is_grabbed(&cursor);

    for (
        entity,
        mut controller,
        links,
        action_state,
        position,
        mut rotation,
        mut transform,
        mut linear_velocity,
        mut angular_velocity,
        mass,
    ) in &mut player_query
    {
        let probe = probe_query
            .get(links.ground_probe)
            .ok()
            .map(|probe| position.0 + rotation.0 * probe.translation);
        let mut camera = camera_query.get_mut(links.camera).ok();

        let mut rig = PlayerRig::builder::<AvianBody, &mut Quat, &mut Quat, Vec3>()
            .body(AvianBody {
                linear: &mut linear_velocity,
                angular: &mut angular_velocity,
                inverse_mass: mass.inverse(),
            })
            .transform(&mut rotation.0)
            .camera(camera.as_mut().map(|camera| &mut camera.rotation))
            .ground_probe(probe)
            .build()?;

        let world = AvianOverlap {
            spatial_query: &spatial_query,
            exclude: entity,
        };
        if grabbed {
            controller
                .0
                .frame_update(&mut rig, &ActionInput(action_state), &world, dt);
        } else {
            controller.0.frame_update(&mut rig, &NeutralInput, &world, dt);
        }

        // Keep the rendered transform in step with the yaw written to the body.
        transform.rotation = rotation.0;
    }

    Ok(())
}

/// Physics hook: locomotion velocity and upright correction.
#[allow(clippy::type_complexity)]
fn player_physics_step(
    mut player_query: Query<
        (
            &PlayerController,
            &PlayerRigLinks,
            &Rotation,
            &mut LinearVelocity,
            &mut AngularVelocity,
            &ComputedMass,
        ),
        With<Player>,
    >,
    camera_query: Query<&Transform, (With<PlayerCamera>, Without<Player>)>,
    probe_query: Query<&Transform, (With<GroundCheck>, Without<Player>)>,
) -> Result {
    for (controller, links, rotation, mut linear_velocity, mut angular_velocity, mass) in
        &mut player_query
    {
        let mut rig = PlayerRig::builder::<AvianBody, Quat, Quat, Vec3>()
            .body(AvianBody {
                linear: &mut linear_velocity,
                angular: &mut angular_velocity,
                inverse_mass: mass.inverse(),
            })
            .transform(rotation.0)
            .camera(camera_query.get(links.camera).ok().map(|t| t.rotation))
            .ground_probe(probe_query.get(links.ground_probe).ok().map(|t| t.translation))
            .build()?;

        controller.0.physics_step(&mut rig);
    }

    Ok(())
}
