//! Read-only follow bindings
//!
//! A height cursor can sit on a wall midpoint or on one edge of a
//! structure. The geometry comes from the scene every frame; the cursor
//! never writes back through a follow binding.

use serde::{Serialize, Deserialize};
use crate::geometry::{rotate_y, Vec3};
use super::EntityId;

/// Which side of a structure a cursor follows, in the structure's frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureEdge {
    Left,
    Right,
}

/// What a structure exposes to a following cursor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureGeometry {
    pub position: Vec3,
    /// Orientation about +Y, degrees
    pub yaw: f32,
    /// Footprint width along the local X axis
    pub width: f32,
    /// Footprint depth along the local Z axis
    pub depth: f32,
    /// Anchor point of the left edge (structure Y plus local offset)
    pub left_anchor: Vec3,
    /// Anchor point of the right edge
    pub right_anchor: Vec3,
}

impl StructureGeometry {
    pub fn anchor(&self, edge: StructureEdge) -> Vec3 {
        match edge {
            StructureEdge::Left => self.left_anchor,
            StructureEdge::Right => self.right_anchor,
        }
    }

    /// Where a cursor following `edge` sits: half the footprint width to
    /// the side in local space, turned into world space, at the height
    /// of the edge anchor.
    pub fn edge_position(&self, edge: StructureEdge) -> Vec3 {
        let half = self.width * 0.5;
        let local = match edge {
            StructureEdge::Left => Vec3::new(-half, 0.0, 0.0),
            StructureEdge::Right => Vec3::new(half, 0.0, 0.0),
        };
        let world = self.position + rotate_y(local, self.yaw);
        world.with_y(self.anchor(edge).y)
    }
}

/// Midpoint of the first two wall control points, if there are two
pub fn wall_midpoint(points: &[Vec3]) -> Option<Vec3> {
    match points {
        [a, b, ..] => Some((*a + *b) * 0.5),
        _ => None,
    }
}

/// One-way binding that drives a cursor's position from scene geometry.
///
/// Being a single enum, binding one kind of target replaces the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowTarget {
    #[default]
    None,
    Wall(EntityId),
    Structure(EntityId, StructureEdge),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> StructureGeometry {
        StructureGeometry {
            position: Vec3::new(10.0, 1.0, 5.0),
            yaw: 90.0,
            width: 4.0,
            depth: 6.0,
            left_anchor: Vec3::new(10.0, 3.5, 7.0),
            right_anchor: Vec3::new(10.0, 4.0, 3.0),
        }
    }

    #[test]
    fn test_wall_midpoint() {
        let points = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 6.0), Vec3::new(9.0, 0.0, 9.0)];
        let mid = wall_midpoint(&points).unwrap();
        assert!((mid.x - 2.0).abs() < 0.001);
        assert!((mid.z - 3.0).abs() < 0.001);
        assert!(wall_midpoint(&points[..1]).is_none());
    }

    #[test]
    fn test_edge_position_rotates_offset() {
        let h = house();
        // Yaw 90 turns local -X (left) into world +Z
        let left = h.edge_position(StructureEdge::Left);
        assert!((left.x - 10.0).abs() < 0.001, "x={}", left.x);
        assert!((left.z - 7.0).abs() < 0.001, "z={}", left.z);
        assert!((left.y - 3.5).abs() < 0.001);

        let right = h.edge_position(StructureEdge::Right);
        assert!((right.z - 3.0).abs() < 0.001, "z={}", right.z);
        assert!((right.y - 4.0).abs() < 0.001);
    }
}
