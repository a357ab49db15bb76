//! Physics-driven first-person controller.
//!
//! This crate holds the controller logic with no engine dependency. The host
//! engine supplies its rigid body, transforms, input and overlap queries
//! through the traits in [`host`], and calls two hooks:
//!
//! - [`FirstPersonController::frame_update`] once per rendered frame: ground
//!   check, input sampling, yaw/pitch, jump.
//! - [`FirstPersonController::physics_step`] once per fixed physics step:
//!   locomotion velocity and upright stabilization.
//!
//! The frame hook must run before the physics hook consumes its output within
//! the same tick. The hand-off is the [`FrameState`] the frame hook returns.
//!
//! # Conventions
//!
//! Right-handed, +Y up, forward is -Z, right is +X. Angles in the
//! configuration are degrees.
//!
//! # Example
//!
//! ```ignore
//! use upright_fps::{ControllerConfig, FirstPersonController, PlayerRig};
//!
//! let mut rig = PlayerRig::builder()
//!     .body(body)
//!     .transform(rotation)
//!     .camera(camera_rotation)
//!     .ground_probe(feet)
//!     .build()?;
//!
//! let mut controller = FirstPersonController::new(ControllerConfig::default());
//! controller.setup(&mut cursor);
//!
//! // Per frame:
//! controller.frame_update(&mut rig, &input, &world, dt);
//! // Per physics step:
//! controller.physics_step(&mut rig);
//! ```

pub mod config;
mod controller;
mod error;
pub mod ground;
pub mod host;
pub mod locomotion;
pub mod look;
mod rig;
pub mod upright;

#[cfg(test)]
mod testing;

pub use config::{ControllerConfig, LayerMask};
pub use controller::{FirstPersonController, FrameState};
pub use error::{Error, Reference, Result};
pub use rig::{PlayerRig, PlayerRigBuilder};
