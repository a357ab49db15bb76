//! Upright stabilization.
//!
//! Proportional correction toward world up with a fixed damping term on the
//! current angular velocity, applied as a velocity change every physics step.
//! Stateless between steps.

use glam::{Quat, Vec3};

use crate::{host::RigidBodyHandle, locomotion::WORLD_UP};

/// Fraction of the current angular velocity removed each step.
pub const UPRIGHT_DAMPING: f32 = 0.8;

/// Angular velocity change that steers `rotation` back upright.
///
/// The target is `rotation` with its tilt removed; the correction is the
/// vector part of `target * rotation⁻¹` scaled by `gain`, minus
/// [`UPRIGHT_DAMPING`] times `angular_velocity`.
pub fn upright_correction(rotation: Quat, angular_velocity: Vec3, gain: f32) -> Vec3 {
    let current_up = rotation * Vec3::Y;
    let target = Quat::from_rotation_arc(current_up, WORLD_UP) * rotation;
    let difference = target * rotation.inverse();
    difference.xyz() * gain - angular_velocity * UPRIGHT_DAMPING
}

/// Compute and apply the correction for one physics step.
pub fn stabilize(body: &mut impl RigidBodyHandle, rotation: Quat, gain: f32) -> Vec3 {
    let change = upright_correction(rotation, body.angular_velocity(), gain);
    body.apply_angular_velocity_change(change);
    change
}
