//! Placed-object transform
//!
//! Cursors only ever touch position and yaw; pitch, roll and scale are
//! carried through untouched.

use serde::{Serialize, Deserialize};
use crate::geometry::Vec3;

/// World transform of a placed object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Pivot position in world space
    pub position: Vec3,
    /// Rotation in euler angles (degrees); `y` is yaw
    pub rotation: Vec3,
    /// Scale factor (uniform for simplicity)
    pub scale: f32,
}

impl Transform {
    /// Identity transform (origin, no rotation, scale 1)
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: 1.0,
    };

    /// Create transform at a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Create transform with position and yaw
    pub fn from_position_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: Vec3::new(0.0, yaw, 0.0),
            scale: 1.0,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    /// Replace the yaw, leaving pitch and roll alone
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.rotation.y = yaw;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_yaw_keeps_pitch_and_roll() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(5.0, 10.0, -7.0),
            scale: 2.0,
        };
        let r = t.with_yaw(45.0);
        assert_eq!(r.rotation, Vec3::new(5.0, 45.0, -7.0));
        assert_eq!(r.position, t.position);
        assert_eq!(r.scale, 2.0);
    }
}
