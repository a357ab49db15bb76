//! Velocity-controlled horizontal movement and jumping.
//!
//! Horizontal motion is set directly each physics step with no acceleration
//! ramp. Vertical motion is left to the physics engine's gravity, apart from
//! the jump impulse.

use glam::{Quat, Vec3};

use crate::host::RigidBodyHandle;

/// World up.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Below this squared length a projected basis vector is treated as degenerate.
const DEGENERATE_LENGTH_SQUARED: f32 = 1e-6;

/// Right and forward vectors of `rotation`, flattened onto the ground plane.
///
/// Each vector is renormalized after projection so tilt does not slow the
/// player. If the body is tipped far enough that a projection vanishes, the
/// unprojected vector is used instead.
pub fn planar_basis(rotation: Quat) -> (Vec3, Vec3) {
    (
        flatten(rotation * Vec3::X),
        flatten(rotation * Vec3::NEG_Z),
    )
}

fn flatten(direction: Vec3) -> Vec3 {
    let projected = direction - WORLD_UP * direction.dot(WORLD_UP);
    if projected.length_squared() < DEGENERATE_LENGTH_SQUARED {
        direction
    } else {
        projected.normalize()
    }
}

/// Unscaled movement direction for the given strafe/forward input.
///
/// Not normalized: full diagonal input has length √2.
pub fn move_direction(right: Vec3, forward: Vec3, strafe: f32, forward_axis: f32) -> Vec3 {
    right * strafe + forward * forward_axis
}

/// Velocity for this step: `direction * speed` horizontally, with the vertical
/// component carried over from `current`.
pub fn target_velocity(direction: Vec3, speed: f32, current: Vec3) -> Vec3 {
    let mut velocity = direction * speed;
    velocity.y = current.y;
    velocity
}

/// Apply the jump impulse if grounded. Returns whether it was applied.
pub fn try_jump(body: &mut impl RigidBodyHandle, grounded: bool, jump_force: f32) -> bool {
    if !grounded {
        return false;
    }
    body.apply_impulse(WORLD_UP * jump_force);
    true
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};

    use super::*;
    use crate::testing::TestBody;

    #[test]
    fn test_planar_basis_identity() {
        let (right, forward) = planar_basis(Quat::IDENTITY);
        assert!((right - Vec3::X).length() < 1e-6);
        assert!((forward - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_planar_basis_ignores_tilt() {
        // Pitched forward by 30 degrees: forward dips but stays unit length on the plane.
        let rotation = Quat::from_rotation_x(-0.5236);
        let (right, forward) = planar_basis(rotation);
        assert!(forward.y.abs() < 1e-6);
        assert!((forward.length() - 1.0).abs() < 1e-5);
        assert!((right - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_planar_basis_degenerate_forward() {
        // Facing straight down: forward has no horizontal part.
        let rotation = Quat::from_rotation_x(-FRAC_PI_2);
        let (_, forward) = planar_basis(rotation);
        assert!((forward - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn test_strafe_right_keeps_vertical() {
        let direction = move_direction(Vec3::X, Vec3::NEG_Z, 1.0, 0.0);
        let velocity = target_velocity(direction, 6.0, Vec3::new(3.0, -2.5, 1.0));
        assert!((velocity - Vec3::new(6.0, -2.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_diagonal_not_normalized() {
        let direction = move_direction(Vec3::X, Vec3::NEG_Z, 1.0, 1.0);
        let velocity = target_velocity(direction, 6.0, Vec3::ZERO);
        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z).length();
        assert!((horizontal - 6.0 * SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn test_yawed_forward() {
        let (right, forward) = planar_basis(Quat::from_rotation_y(-FRAC_PI_4));
        let velocity = target_velocity(move_direction(right, forward, 0.0, 1.0), 2.0, Vec3::ZERO);
        assert!((velocity.length() - 2.0).abs() < 1e-5);
        assert!((velocity.normalize() - forward).length() < 1e-5);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut body = TestBody::default();
        assert!(!try_jump(&mut body, false, 5.0));
        assert_eq!(body.linear_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_jump_scales_by_mass() {
        let mut body = TestBody {
            mass: 2.0,
            linear_velocity: Vec3::new(1.0, -1.0, 0.0),
            ..Default::default()
        };
        assert!(try_jump(&mut body, true, 5.0));
        assert!((body.linear_velocity - Vec3::new(1.0, 1.5, 0.0)).length() < 1e-6);
    }
}
