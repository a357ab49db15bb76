//! Controller configuration.

/// Bitmask selecting collision layers for the ground check.
///
/// Layout-compatible with the `u32` masks physics engines use, so the host
/// can convert with [`LayerMask::bits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);
    /// Matches no layer.
    pub const NONE: Self = Self(0);

    /// Raw mask bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether any layer is shared with `other`.
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Tuning values for the controller.
///
/// Nothing here is validated. Negative or zero values are accepted and give
/// the corresponding inverted or degenerate behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Horizontal speed at full input on one axis (m/s).
    pub move_speed: f32,
    /// Upward impulse applied on jump (N·s).
    pub jump_force: f32,
    /// Radius of the ground check sphere (m).
    pub ground_distance: f32,
    /// Layers that count as ground.
    pub ground_mask: LayerMask,
    /// Look rate in degrees per look-axis unit per second.
    pub mouse_sensitivity: f32,
    /// Gain applied to the upright correction.
    pub upright_torque: f32,
    /// Maximum tilt before correcting (degrees).
    ///
    /// Carried for compatibility with existing tuning data. The stabilizer
    /// does not read it.
    pub max_rotation_angle: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            jump_force: 5.0,
            ground_distance: 0.4,
            ground_mask: LayerMask::ALL,
            mouse_sensitivity: 100.0,
            upright_torque: 10.0,
            max_rotation_angle: 10.0,
        }
    }
}
