//! Collaborator traits implemented by the host engine.
//!
//! The controller never integrates physics or reads devices itself. It calls
//! these primitives in a fixed order each tick.

use glam::{Quat, Vec3};

use crate::config::LayerMask;

/// Named input axes sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAxis {
    /// Strafe, in [-1, 1]. Positive is right.
    MoveX,
    /// Forward/back, in [-1, 1]. Positive is forward.
    MoveZ,
    /// Horizontal look delta. Positive turns right.
    LookX,
    /// Vertical look delta. Positive looks up.
    LookY,
}

/// Device input as seen by the controller.
pub trait InputSource {
    /// Current value of an axis.
    fn axis(&self, axis: InputAxis) -> f32;
    /// Whether jump went down this frame.
    fn jump_pressed(&self) -> bool;
}

/// Cursor capture.
pub trait CursorControl {
    fn set_cursor_locked(&mut self, locked: bool);
}

/// Physics world overlap test.
pub trait OverlapQuery {
    /// Whether a sphere at `center` overlaps any collider on `mask`.
    fn overlaps_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;
}

/// The player's rigid body.
pub trait RigidBodyHandle {
    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn angular_velocity(&self) -> Vec3;
    /// Instantaneous momentum change; the velocity changes by `impulse / mass`.
    fn apply_impulse(&mut self, impulse: Vec3);
    /// Instantaneous angular velocity change, independent of inertia.
    fn apply_angular_velocity_change(&mut self, delta: Vec3);
}

/// The player entity's own rotation. Yaw is written here directly.
pub trait EntityTransform {
    fn rotation(&self) -> Quat;
    /// Rotate about a world-space axis by `angle` radians.
    fn rotate_about_world_axis(&mut self, axis: Vec3, angle: f32);
}

/// The camera child. Only its local rotation is touched.
pub trait CameraTransform {
    fn local_rotation(&self) -> Quat;
    fn set_local_rotation(&mut self, rotation: Quat);
}

/// Center of the ground check sphere.
pub trait GroundProbe {
    fn world_position(&self) -> Vec3;
}

impl EntityTransform for Quat {
    fn rotation(&self) -> Quat {
        *self
    }

    fn rotate_about_world_axis(&mut self, axis: Vec3, angle: f32) {
        *self = (Quat::from_axis_angle(axis, angle) * *self).normalize();
    }
}

impl CameraTransform for Quat {
    fn local_rotation(&self) -> Quat {
        *self
    }

    fn set_local_rotation(&mut self, rotation: Quat) {
        *self = rotation;
    }
}

impl GroundProbe for Vec3 {
    fn world_position(&self) -> Vec3 {
        *self
    }
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn axis(&self, axis: InputAxis) -> f32 {
        (**self).axis(axis)
    }

    fn jump_pressed(&self) -> bool {
        (**self).jump_pressed()
    }
}

impl<T: OverlapQuery + ?Sized> OverlapQuery for &T {
    fn overlaps_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        (**self).overlaps_sphere(center, radius, mask)
    }
}

impl<T: CursorControl + ?Sized> CursorControl for &mut T {
    fn set_cursor_locked(&mut self, locked: bool) {
        (**self).set_cursor_locked(locked);
    }
}

impl<T: RigidBodyHandle + ?Sized> RigidBodyHandle for &mut T {
    fn linear_velocity(&self) -> Vec3 {
        (**self).linear_velocity()
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        (**self).set_linear_velocity(velocity);
    }

    fn angular_velocity(&self) -> Vec3 {
        (**self).angular_velocity()
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        (**self).apply_impulse(impulse);
    }

    fn apply_angular_velocity_change(&mut self, delta: Vec3) {
        (**self).apply_angular_velocity_change(delta);
    }
}

impl<T: EntityTransform + ?Sized> EntityTransform for &mut T {
    fn rotation(&self) -> Quat {
        (**self).rotation()
    }

    fn rotate_about_world_axis(&mut self, axis: Vec3, angle: f32) {
        (**self).rotate_about_world_axis(axis, angle);
    }
}

impl<T: CameraTransform + ?Sized> CameraTransform for &mut T {
    fn local_rotation(&self) -> Quat {
        (**self).local_rotation()
    }

    fn set_local_rotation(&mut self, rotation: Quat) {
        (**self).set_local_rotation(rotation);
    }
}

impl<T: GroundProbe + ?Sized> GroundProbe for &T {
    fn world_position(&self) -> Vec3 {
        (**self).world_position()
    }
}
