//! Ground detection.

use glam::Vec3;

use crate::{config::LayerMask, host::OverlapQuery};

/// Whether a sphere of `radius` at `probe` touches anything on `mask`.
///
/// Pure query with no side effects; the caller caches the answer for the
/// rest of the frame.
pub fn is_grounded(world: &impl OverlapQuery, probe: Vec3, radius: f32, mask: LayerMask) -> bool {
    world.overlaps_sphere(probe, radius, mask)
}
