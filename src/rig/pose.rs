use glam::Vec3;

use super::Rotator;

/// World-space rigid-body pose published once per step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Rotator,
}

/// Camera viewpoint for one step: the seat offset above the body pivot and
/// the rotation the camera should adopt.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewPoint {
    pub offset: Vec3,
    pub rotation: Rotator,
}
