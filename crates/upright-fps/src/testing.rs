//! In-memory collaborators for unit tests.

use std::collections::HashMap;

use glam::{Quat, Vec3};

use crate::{
    config::LayerMask,
    host::{CursorControl, InputAxis, InputSource, OverlapQuery, RigidBodyHandle},
    rig::PlayerRig,
};

/// Rigid body that records velocity changes without integrating.
#[derive(Debug, Clone)]
pub struct TestBody {
    pub mass: f32,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl Default for TestBody {
    fn default() -> Self {
        Self {
            mass: 1.0,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }
}

impl RigidBodyHandle for TestBody {
    fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.linear_velocity = velocity;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.linear_velocity += impulse / self.mass;
    }

    fn apply_angular_velocity_change(&mut self, delta: Vec3) {
        self.angular_velocity += delta;
    }
}

#[derive(Debug, Default)]
pub struct TestInput {
    pub axes: HashMap<InputAxis, f32>,
    pub jump: bool,
}

impl TestInput {
    pub fn with_axis(mut self, axis: InputAxis, value: f32) -> Self {
        self.axes.insert(axis, value);
        self
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }
}

impl InputSource for TestInput {
    fn axis(&self, axis: InputAxis) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    fn jump_pressed(&self) -> bool {
        self.jump
    }
}

/// World with a single flat floor at `floor_height` on `floor_layers`.
#[derive(Debug)]
pub struct TestWorld {
    pub floor_height: f32,
    pub floor_layers: LayerMask,
}

impl TestWorld {
    pub fn floor() -> Self {
        Self {
            floor_height: 0.0,
            floor_layers: LayerMask(1),
        }
    }
}

impl OverlapQuery for TestWorld {
    fn overlaps_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        mask.intersects(self.floor_layers) && center.y - radius <= self.floor_height
    }
}

#[derive(Debug, Default)]
pub struct TestCursor {
    pub locked: bool,
    pub calls: usize,
}

impl CursorControl for TestCursor {
    fn set_cursor_locked(&mut self, locked: bool) {
        self.locked = locked;
        self.calls += 1;
    }
}

pub type TestRig = PlayerRig<TestBody, Quat, Quat, Vec3>;

/// Upright rig with its probe at `probe_height`.
pub fn rig_at(probe_height: f32) -> TestRig {
    PlayerRig {
        body: TestBody::default(),
        transform: Quat::IDENTITY,
        camera: Quat::IDENTITY,
        ground_probe: Vec3::new(0.0, probe_height, 0.0),
    }
}
