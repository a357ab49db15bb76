//! Physics integration using Avian 3D.
//!
//! Sets up the physics plugins, collision layers and debug gizmos, and adapts
//! Avian's rigid body components and spatial queries to the controller's
//! [`RigidBodyHandle`] and [`OverlapQuery`] traits.

use avian3d::debug_render::{PhysicsDebugPlugin, PhysicsGizmos};
use avian3d::prelude::*;
use bevy::color::palettes::css::LIME;
use bevy::gizmos::config::{GizmoConfig, GizmoConfigStore};
use bevy::prelude::*;
use upright_fps::host::{OverlapQuery, RigidBodyHandle};

use crate::launch_params::LaunchParams;

/// Collision layers.
///
/// The player's ground check only looks at `Ground`, so the capsule never
/// detects itself.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    /// Walkable static geometry.
    #[default]
    Ground,
    /// The player capsule.
    Player,
}

impl GameLayer {
    /// This layer as a controller mask.
    pub fn controller_mask(self) -> upright_fps::LayerMask {
        upright_fps::LayerMask(self.to_bits())
    }
}

/// Plugin for physics integration.
pub struct PhysicsIntegrationPlugin;

impl Plugin for PhysicsIntegrationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PhysicsPlugins::default())
            // Add debug rendering plugin (disabled by default).
            .add_plugins(PhysicsDebugPlugin)
            .add_systems(Startup, configure_physics_debug_on_startup);
    }
}

/// Configure physics debug rendering on startup from the launch parameters.
fn configure_physics_debug_on_startup(
    params: Res<LaunchParams>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    let physics_gizmos = PhysicsGizmos {
        collider_color: Some(LIME.into()),
        ..Default::default()
    };

    // Use negative depth_bias to render gizmos on top of geometry.
    let gizmo_config = GizmoConfig {
        enabled: params.debug_physics,
        depth_bias: -1.0,
        ..Default::default()
    };

    config_store.insert(gizmo_config, physics_gizmos);
}

/// Toggle physics debug visualization.
pub fn toggle_physics_debug(config_store: &mut GizmoConfigStore) {
    let (config, _) = config_store.config_mut::<PhysicsGizmos>();
    config.enabled = !config.enabled;
    tracing::info!("Physics debug visualization: {}", config.enabled);
}

/// Check if physics debug is currently enabled.
pub fn is_physics_debug_enabled(config_store: &GizmoConfigStore) -> bool {
    let (config, _) = config_store.config::<PhysicsGizmos>();
    config.enabled
}

// ============================================================================
// Controller adapters
// ============================================================================

/// Avian body velocities, seen as the controller's rigid body.
pub struct AvianBody<'a> {
    pub linear: &'a mut LinearVelocity,
    pub angular: &'a mut AngularVelocity,
    /// Inverse mass; zero for bodies with infinite mass.
    pub inverse_mass: f32,
}

impl RigidBodyHandle for AvianBody<'_> {
    fn linear_velocity(&self) -> Vec3 {
        self.linear.0
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.linear.0 = velocity;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angular.0
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.linear.0 += impulse * self.inverse_mass;
    }

    fn apply_angular_velocity_change(&mut self, delta: Vec3) {
        self.angular.0 += delta;
    }
}

/// Avian spatial queries, seen as the controller's overlap test.
pub struct AvianOverlap<'a, 'w, 's> {
    pub spatial_query: &'a SpatialQuery<'w, 's>,
    /// Entity ignored by the query (the player itself).
    pub exclude: Entity,
}

impl OverlapQuery for AvianOverlap<'_, '_, '_> {
    fn overlaps_sphere(&self, center: Vec3, radius: f32, mask: upright_fps::LayerMask) -> bool {
        let filter = SpatialQueryFilter::from_mask(LayerMask(mask.bits()))
            .with_excluded_entities([self.exclude]);
        !self
            .spatial_query
            .shape_intersections(&Collider::sphere(radius), center, Quat::IDENTITY, &filter)
            .is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_scales_by_inverse_mass() {
        let mut linear = LinearVelocity(Vec3::new(0.0, -1.0, 0.0));
        let mut angular = AngularVelocity::default();
        let mut body = AvianBody {
            linear: &mut linear,
            angular: &mut angular,
            inverse_mass: 0.5,
        };
        body.apply_impulse(Vec3::new(0.0, 4.0, 0.0));
        body.apply_angular_velocity_change(Vec3::X);
        assert_eq!(linear.0, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(angular.0, Vec3::X);
    }

    #[test]
    fn test_ground_layer_mask_excludes_player() {
        let ground = GameLayer::Ground.controller_mask();
        let player = GameLayer::Player.controller_mask();
        assert!(!ground.intersects(player));
    }
}
