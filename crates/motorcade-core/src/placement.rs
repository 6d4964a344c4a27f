//! Placement math for car instances.
//!
//! Each configured car yields four instances: the primary, parked on the
//! near lane, and three clones mirrored onto the far lane and the two
//! cross lanes. All of them derive from the car's `counter` offset.

use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

use crate::config::CarPlacement;

/// Distance from the origin to each lane, in world units.
pub const LANE_EDGE: f32 = 90.0;

/// Yaw applied to the three clones, in order.
pub const CLONE_ROTATIONS: [f32; 3] = [PI, FRAC_PI_2, -FRAC_PI_2];

/// Translation of the primary instance.
pub fn primary_translation(placement: &CarPlacement) -> Vec3 {
    Vec3::new(-placement.counter, placement.vertical_offset, -LANE_EDGE)
}

/// Yaw and translation of the three clone instances, in a fixed order
/// paired with [`CLONE_ROTATIONS`].
pub fn clone_poses(placement: &CarPlacement) -> [(f32, Vec3); 3] {
    let y = placement.vertical_offset;
    let counter = placement.counter;
    [
        (CLONE_ROTATIONS[0], Vec3::new(counter, y, LANE_EDGE)),
        (CLONE_ROTATIONS[1], Vec3::new(-LANE_EDGE, y, counter)),
        (CLONE_ROTATIONS[2], Vec3::new(LANE_EDGE, y, -counter)),
    ]
}
