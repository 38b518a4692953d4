//! Pure orientation and pose primitives for the rider rig.

mod pose;
mod rotator;

pub use pose::{Pose, ViewPoint};
pub use rotator::{wrap_angle, Rotator};
