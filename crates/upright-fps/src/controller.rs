//! The per-tick control loop.

use glam::{Vec2, Vec3};

use crate::{
    config::ControllerConfig,
    ground,
    host::{
        CameraTransform, CursorControl, EntityTransform, GroundProbe, InputAxis, InputSource,
        OverlapQuery, RigidBodyHandle,
    },
    locomotion,
    look::{self, LookState},
    rig::PlayerRig,
    upright,
};

/// State sampled and derived by the frame hook.
///
/// Written once per frame by [`FirstPersonController::frame_update`] and only
/// read by [`FirstPersonController::physics_step`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameState {
    /// Ground check result for this frame.
    pub grounded: bool,
    /// Raw (strafe, forward) input.
    pub move_input: Vec2,
    /// World-space movement direction before speed scaling.
    pub move_direction: Vec3,
    /// Whether a jump impulse was applied this frame.
    pub jumped: bool,
}

/// First-person controller.
///
/// Holds configuration and the state that persists between ticks. The handles
/// it drives are passed in as a [`PlayerRig`] on every call.
#[derive(Debug, Clone, Default)]
pub struct FirstPersonController {
    config: ControllerConfig,
    look: LookState,
    frame: FrameState,
}

impl FirstPersonController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            look: LookState::default(),
            frame: FrameState::default(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ControllerConfig {
        &mut self.config
    }

    /// Camera pitch in degrees. Positive looks down.
    pub fn pitch(&self) -> f32 {
        self.look.pitch()
    }

    /// The state the next physics step will consume.
    pub fn frame(&self) -> &FrameState {
        &self.frame
    }

    /// One-time setup: captures the cursor.
    pub fn setup(&self, cursor: &mut impl CursorControl) {
        cursor.set_cursor_locked(true);
        tracing::info!(config = ?self.config, "first-person controller ready");
    }

    /// Per-frame hook.
    ///
    /// Runs the ground check, samples input, derives the movement direction,
    /// applies yaw and pitch, and fires the jump impulse on a grounded jump
    /// edge. The result is stored for the next [`Self::physics_step`] and
    /// returned.
    pub fn frame_update<B, T, C, P>(
        &mut self,
        rig: &mut PlayerRig<B, T, C, P>,
        input: &impl InputSource,
        world: &impl OverlapQuery,
        dt: f32,
    ) -> FrameState
    where
        B: RigidBodyHandle,
        T: EntityTransform,
        C: CameraTransform,
        P: GroundProbe,
    {
        let config = &self.config;

        let grounded = ground::is_grounded(
            world,
            rig.ground_probe.world_position(),
            config.ground_distance,
            config.ground_mask,
        );
        if grounded != self.frame.grounded {
            tracing::debug!(grounded, "ground contact changed");
        }

        let move_input = Vec2::new(input.axis(InputAxis::MoveX), input.axis(InputAxis::MoveZ));
        // Direction uses the heading from before this frame's yaw.
        let (right, forward) = locomotion::planar_basis(rig.transform.rotation());
        let move_direction = locomotion::move_direction(right, forward, move_input.x, move_input.y);

        let sensitivity = config.mouse_sensitivity;
        look::apply_yaw(
            &mut rig.transform,
            input.axis(InputAxis::LookX),
            sensitivity,
            dt,
        );
        look::apply_pitch(
            &mut self.look,
            &mut rig.camera,
            input.axis(InputAxis::LookY),
            sensitivity,
            dt,
        );

        let jumped =
            input.jump_pressed() && locomotion::try_jump(&mut rig.body, grounded, config.jump_force);
        if jumped {
            tracing::debug!(jump_force = config.jump_force, "jump");
        }

        self.frame = FrameState {
            grounded,
            move_input,
            move_direction,
            jumped,
        };
        self.frame
    }

    /// Per-physics-step hook.
    ///
    /// Sets the horizontal velocity from the last [`FrameState`] and applies the
    /// upright correction. Before the first frame hook this behaves as if
    /// nothing is pressed.
    pub fn physics_step<B, T, C, P>(&self, rig: &mut PlayerRig<B, T, C, P>)
    where
        B: RigidBodyHandle,
        T: EntityTransform,
    {
        let velocity = locomotion::target_velocity(
            self.frame.move_direction,
            self.config.move_speed,
            rig.body.linear_velocity(),
        );
        rig.body.set_linear_velocity(velocity);

        let change = upright::stabilize(
            &mut rig.body,
            rig.transform.rotation(),
            self.config.upright_torque,
        );
        tracing::trace!(?velocity, ?change, "physics step");
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::SQRT_2;

    use glam::Quat;

    use super::*;
    use crate::{
        config::LayerMask,
        testing::{TestCursor, TestInput, TestWorld, rig_at},
    };

    const DT: f32 = 1.0 / 60.0;

    fn controller() -> FirstPersonController {
        FirstPersonController::new(ControllerConfig {
            ground_mask: LayerMask(1),
            ..Default::default()
        })
    }

    #[test]
    fn test_setup_locks_cursor_once() {
        let mut cursor = TestCursor::default();
        controller().setup(&mut cursor);
        assert!(cursor.locked);
        assert_eq!(cursor.calls, 1);
    }

    #[test]
    fn test_jump_while_airborne_does_nothing() {
        let mut controller = controller();
        let mut rig = rig_at(2.0);
        rig.body.linear_velocity = Vec3::new(0.0, -3.0, 0.0);

        let frame = controller.frame_update(
            &mut rig,
            &TestInput::default().with_jump(),
            &TestWorld::floor(),
            DT,
        );

        assert!(!frame.grounded);
        assert!(!frame.jumped);
        assert_eq!(rig.body.linear_velocity, Vec3::new(0.0, -3.0, 0.0));
    }

    #[test]
    fn test_grounded_jump_adds_jump_force() {
        let mut controller = controller();
        let mut rig = rig_at(0.2);
        rig.body.linear_velocity = Vec3::new(1.0, -0.5, 0.0);

        let frame = controller.frame_update(
            &mut rig,
            &TestInput::default().with_jump(),
            &TestWorld::floor(),
            DT,
        );

        assert!(frame.grounded && frame.jumped);
        let expected = -0.5 + controller.config().jump_force;
        assert!((rig.body.linear_velocity.y - expected).abs() < 1e-6);
    }

    #[test]
    fn test_strafe_moves_along_right() {
        let mut controller = controller();
        let mut rig = rig_at(0.2);
        rig.transform = Quat::from_rotation_y(0.7);
        rig.body.linear_velocity = Vec3::new(0.0, -1.25, 0.0);
        let right = rig.transform * Vec3::X;

        controller.frame_update(
            &mut rig,
            &TestInput::default().with_axis(InputAxis::MoveX, 1.0),
            &TestWorld::floor(),
            DT,
        );
        controller.physics_step(&mut rig);

        let velocity = rig.body.linear_velocity;
        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
        assert!((horizontal.length() - controller.config().move_speed).abs() < 1e-5);
        assert!((horizontal.normalize() - right).length() < 1e-5);
        assert!((velocity.y - -1.25).abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_speed_exceeds_move_speed() {
        let mut controller = controller();
        let mut rig = rig_at(0.2);

        controller.frame_update(
            &mut rig,
            &TestInput::default()
                .with_axis(InputAxis::MoveX, 1.0)
                .with_axis(InputAxis::MoveZ, 1.0),
            &TestWorld::floor(),
            DT,
        );
        controller.physics_step(&mut rig);

        let velocity = rig.body.linear_velocity;
        let speed = Vec3::new(velocity.x, 0.0, velocity.z).length();
        assert!((speed - controller.config().move_speed * SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn test_physics_before_first_frame_stops_horizontal() {
        let controller = controller();
        let mut rig = rig_at(0.2);
        rig.body.linear_velocity = Vec3::new(4.0, 2.0, -4.0);

        controller.physics_step(&mut rig);

        assert_eq!(controller.frame(), &FrameState::default());
        assert_eq!(rig.body.linear_velocity, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_frame_state_reused_across_physics_steps() {
        let mut controller = controller();
        let mut rig = rig_at(0.2);

        controller.frame_update(
            &mut rig,
            &TestInput::default().with_axis(InputAxis::MoveZ, 1.0),
            &TestWorld::floor(),
            DT,
        );
        // Two physics steps in one frame: both see the same input.
        controller.physics_step(&mut rig);
        controller.physics_step(&mut rig);

        assert!((rig.body.linear_velocity - Vec3::new(0.0, 0.0, -6.0)).length() < 1e-5);
    }

    #[test]
    fn test_look_updates_body_and_camera() {
        let mut controller = controller();
        let mut rig = rig_at(0.2);

        controller.frame_update(
            &mut rig,
            &TestInput::default()
                .with_axis(InputAxis::LookX, 0.5)
                .with_axis(InputAxis::LookY, -0.3),
            &TestWorld::floor(),
            0.1,
        );

        // 0.5 * 100 * 0.1 = 5 degrees right.
        let forward = rig.transform * Vec3::NEG_Z;
        assert!((forward.x - 5f32.to_radians().sin()).abs() < 1e-5);
        // -0.3 * 100 * 0.1 = 3 degrees down.
        assert!((controller.pitch() - 3.0).abs() < 1e-5);
        assert!((rig.camera * Vec3::NEG_Z).y < 0.0);
    }

    #[test]
    fn test_upright_body_at_rest_gets_no_spin() {
        let controller = controller();
        let mut rig = rig_at(0.2);
        controller.physics_step(&mut rig);
        assert!(rig.body.angular_velocity.length() < 1e-6);
    }

    #[test]
    fn test_tilted_body_gets_corrected() {
        let controller = controller();
        let mut rig = rig_at(0.2);
        rig.transform = Quat::from_rotation_x(0.4);
        controller.physics_step(&mut rig);
        // Pitched back about +X; correction spins about -X.
        assert!(rig.body.angular_velocity.x < 0.0);
    }
}
