//! Mouse look: yaw on the body, clamped pitch on the camera.

use glam::Quat;

use crate::{
    host::{CameraTransform, EntityTransform},
    locomotion::WORLD_UP,
};

/// Pitch limit in degrees, either direction.
pub const PITCH_LIMIT_DEGREES: f32 = 90.0;

/// Persistent look state.
///
/// Positive pitch looks down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookState {
    pitch: f32,
}

impl LookState {
    /// Current pitch in degrees, always within ±[`PITCH_LIMIT_DEGREES`].
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Accumulate a vertical look delta (positive looks up) and clamp.
    pub fn add_pitch(&mut self, look_y: f32, sensitivity: f32, dt: f32) -> f32 {
        self.pitch = clamp_pitch(self.pitch - look_y * sensitivity * dt);
        self.pitch
    }

    /// Camera local rotation for the current pitch. Pure pitch, no roll or yaw.
    pub fn camera_rotation(&self) -> Quat {
        // Positive rotation about +X tilts -Z upward, the opposite of our pitch sign.
        Quat::from_rotation_x(-self.pitch.to_radians())
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    // NaN resets to level.
    if pitch.is_nan() {
        return 0.0;
    }
    pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES)
}

/// Yaw the body about world up. Positive `look_x` turns right.
pub fn apply_yaw(transform: &mut impl EntityTransform, look_x: f32, sensitivity: f32, dt: f32) {
    let degrees = look_x * sensitivity * dt;
    // Turning right is clockwise from above, a negative angle about +Y.
    transform.rotate_about_world_axis(WORLD_UP, -degrees.to_radians());
}

/// Update the pitch accumulator and overwrite the camera's local rotation.
pub fn apply_pitch(
    state: &mut LookState,
    camera: &mut impl CameraTransform,
    look_y: f32,
    sensitivity: f32,
    dt: f32,
) {
    state.add_pitch(look_y, sensitivity, dt);
    camera.set_local_rotation(state.camera_rotation());
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_yaw_right_turns_clockwise() {
        let mut rotation = Quat::IDENTITY;
        // 90 degrees: 1.0 axis * 90 deg/s * 1 s.
        apply_yaw(&mut rotation, 1.0, 90.0, 1.0);
        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_yaw_accumulates_past_full_turn() {
        let mut rotation = Quat::IDENTITY;
        for _ in 0..5 {
            apply_yaw(&mut rotation, 1.0, 90.0, 1.0);
        }
        // 450 degrees lands on the same heading as 90.
        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_look_up_lowers_pitch() {
        let mut state = LookState::default();
        state.add_pitch(1.0, 100.0, 0.1);
        assert!((state.pitch() + 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_clamps() {
        let mut state = LookState::default();
        state.add_pitch(-100.0, 100.0, 1.0);
        assert_eq!(state.pitch(), PITCH_LIMIT_DEGREES);
        state.add_pitch(1000.0, 100.0, 1.0);
        assert_eq!(state.pitch(), -PITCH_LIMIT_DEGREES);
    }

    #[test]
    fn test_camera_is_pure_pitch() {
        let mut state = LookState::default();
        // Start from a camera carrying roll and yaw; pitch overwrites both.
        let mut camera = Quat::from_rotation_z(0.3) * Quat::from_rotation_y(0.7);
        apply_pitch(&mut state, &mut camera, 1.0, 45.0, 1.0);

        let (axis, angle) = camera.to_axis_angle();
        assert!((axis.abs() - Vec3::X).length() < 1e-5);
        assert!((angle - 45f32.to_radians()).abs() < 1e-5);
        // Looking up: forward gains a positive Y component.
        assert!((camera * Vec3::NEG_Z).y > 0.0);
    }

    #[test]
    fn test_nan_delta_resets_pitch() {
        let mut state = LookState::default();
        state.add_pitch(f32::NAN, 100.0, 0.016);
        assert_eq!(state.pitch(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_pitch_stays_in_range(
            deltas in prop::collection::vec(-1.0e4f32..1.0e4, 0..64),
            sensitivity in -500.0f32..500.0,
            dt in 0.0f32..0.5,
        ) {
            let mut state = LookState::default();
            for delta in deltas {
                let pitch = state.add_pitch(delta, sensitivity, dt);
                prop_assert!((-PITCH_LIMIT_DEGREES..=PITCH_LIMIT_DEGREES).contains(&pitch));
            }
        }
    }
}
