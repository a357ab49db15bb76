//! Launch parameter parsing for the sandbox.
//!
//! On native, parameters are parsed from command-line arguments using clap.
//! On WASM, defaults are used (CLI argument parsing is not available).

use bevy::prelude::*;
use upright_fps::ControllerConfig;

/// Default fixed physics rate in Hz.
const DEFAULT_PHYSICS_HZ: f64 = 50.0;

/// Launch parameters for the sandbox.
#[derive(Resource, Debug, Clone)]
pub struct LaunchParams {
    /// Controller tuning. The ground mask is filled in at spawn time.
    pub controller: ControllerConfig,
    /// Fixed physics step rate in Hz.
    pub physics_hz: f64,
    /// Start with physics debug gizmos enabled.
    pub debug_physics: bool,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            physics_hz: DEFAULT_PHYSICS_HZ,
            debug_physics: false,
        }
    }
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use clap::Parser;

    use super::*;

    /// Parse a strictly positive rate.
    fn parse_hz(s: &str) -> Result<f64, String> {
        let hz = s
            .parse::<f64>()
            .map_err(|e| format!("invalid rate: {e}"))?;
        if hz.is_finite() && hz > 0.0 {
            Ok(hz)
        } else {
            Err(format!("rate must be positive, got {hz}"))
        }
    }

    #[derive(Parser)]
    #[command(about = "First-person controller sandbox")]
    struct CliArgs {
        /// Horizontal move speed in m/s.
        #[arg(long)]
        move_speed: Option<f32>,

        /// Jump impulse in N·s.
        #[arg(long)]
        jump_force: Option<f32>,

        /// Look sensitivity in degrees per axis unit per second.
        #[arg(long)]
        mouse_sensitivity: Option<f32>,

        /// Gain of the upright correction.
        #[arg(long)]
        upright_torque: Option<f32>,

        /// Radius of the ground check sphere in meters.
        #[arg(long)]
        ground_distance: Option<f32>,

        /// Fixed physics rate in Hz.
        #[arg(long, default_value_t = DEFAULT_PHYSICS_HZ, value_parser = parse_hz)]
        physics_hz: f64,

        /// Show collider gizmos on startup.
        #[arg(long)]
        debug_physics: bool,
    }

    pub fn parse() -> LaunchParams {
        let args = CliArgs::parse();
        let defaults = ControllerConfig::default();
        LaunchParams {
            controller: ControllerConfig {
                move_speed: args.move_speed.unwrap_or(defaults.move_speed),
                jump_force: args.jump_force.unwrap_or(defaults.jump_force),
                mouse_sensitivity: args
                    .mouse_sensitivity
                    .unwrap_or(defaults.mouse_sensitivity),
                upright_torque: args.upright_torque.unwrap_or(defaults.upright_torque),
                ground_distance: args.ground_distance.unwrap_or(defaults.ground_distance),
                ..defaults
            },
            physics_hz: args.physics_hz,
            debug_physics: args.debug_physics,
        }
    }

}

/// Parse launch parameters from CLI args (native) or use defaults (WASM).
pub fn parse() -> LaunchParams {
    #[cfg(not(target_family = "wasm"))]
    {
        native::parse()
    }
    #[cfg(target_family = "wasm")]
    {
        LaunchParams::default()
    }
}
