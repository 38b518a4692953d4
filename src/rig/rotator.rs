use std::f32::consts::PI;

use glam::{Quat, Vec3};

/// Wraps an angle in radians into `[-PI, PI]`.
pub fn wrap_angle(rad: f32) -> f32 {
    if (-PI..=PI).contains(&rad) {
        return rad;
    }
    const TWO_PI: f32 = 2.0 * PI;
    const THREE_PI: f32 = 3.0 * PI;
    (rad + THREE_PI) % TWO_PI - PI
}

/// Orientation as Tait-Bryan angles in radians.
///
/// Conventions: Y-up, forward is +Z at zero rotation. `yaw` turns about the
/// world up axis, `pitch` raises the forward axis toward +Y, `roll` banks
/// about the forward axis. Roll is carried as an independent component so it
/// can be blended separately from the tangent-derived yaw and pitch.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Orientation whose forward axis points along `direction`, with zero
    /// roll. A degenerate direction yields the identity.
    pub fn from_forward(direction: Vec3) -> Self {
        let horizontal = (direction.x * direction.x + direction.z * direction.z).sqrt();
        if horizontal < f32::EPSILON && direction.y.abs() < f32::EPSILON {
            return Self::IDENTITY;
        }
        Self {
            pitch: direction.y.atan2(horizontal),
            yaw: direction.x.atan2(direction.z),
            roll: 0.0,
        }
    }

    /// Equivalent quaternion, applying yaw, then pitch, then roll about the
    /// successively rotated local axes.
    pub fn to_quat(self) -> Quat {
        Quat::from_rotation_y(self.yaw)
            * Quat::from_rotation_x(-self.pitch)
            * Quat::from_rotation_z(self.roll)
    }

    pub fn forward(self) -> Vec3 {
        self.to_quat() * Vec3::Z
    }

    pub fn up(self) -> Vec3 {
        self.to_quat() * Vec3::Y
    }

    /// All three components wrapped into `[-PI, PI]`.
    pub fn wrapped(self) -> Self {
        Self {
            pitch: wrap_angle(self.pitch),
            yaw: wrap_angle(self.yaw),
            roll: wrap_angle(self.roll),
        }
    }
}
