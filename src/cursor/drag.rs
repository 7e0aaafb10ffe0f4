//! Drag session building blocks
//!
//! Every drag captures a reference plane and the pointer's point on it
//! at drag start, then re-intersects the live pointer ray with that same
//! plane each frame. A failed intersection just skips the frame.

use crate::geometry::{clamp_snap, signed_yaw_between, snap_angle, snap_xz, Camera, Plane, Ray, Vec3};

/// Which drag a cursor is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// Horizontal move
    Xz,
    /// Vertical move
    Y,
    /// Yaw rotation
    Rotate,
}

/// Translation along a plane fixed at drag start
#[derive(Debug, Clone, Copy)]
pub struct PlaneDrag {
    pub plane: Plane,
    /// World point under the pointer at drag start
    pub start_point: Vec3,
    /// Position of whatever is being dragged at drag start
    pub start_position: Vec3,
}

impl PlaneDrag {
    fn begin(plane: Plane, ray: &Ray, fallback_point: Vec3, position: Vec3) -> Self {
        // Project the press onto the plane so the first step has no jump;
        // the raw hit point is only used if that projection fails
        let start_point = plane.raycast(ray).unwrap_or(fallback_point);
        Self {
            plane,
            start_point,
            start_position: position,
        }
    }

    /// Horizontal plane through `position`
    pub fn horizontal(ray: &Ray, fallback_point: Vec3, position: Vec3) -> Self {
        Self::begin(Plane::horizontal(position), ray, fallback_point, position)
    }

    /// Vertical plane through `position` that faces the camera
    pub fn vertical(camera: &Camera, ray: &Ray, fallback_point: Vec3, position: Vec3) -> Self {
        Self::begin(
            Plane::vertical_facing(position, camera.forward()),
            ray,
            fallback_point,
            position,
        )
    }

    /// World-space pointer movement since drag start
    pub fn delta(&self, ray: &Ray) -> Option<Vec3> {
        Some(self.plane.raycast(ray)? - self.start_point)
    }

    /// New horizontal position: start plus pointer delta, X and Z
    /// snapped, Y held at the start height
    pub fn step_xz(&self, ray: &Ray, snap_interval: f32) -> Option<Vec3> {
        let moved = self.start_position + self.delta(ray)?;
        Some(snap_xz(moved, snap_interval).with_y(self.start_position.y))
    }

    /// New height: `start_height` plus the world-Y pointer delta, clamped
    /// to `min_height`, snapped, and clamped again
    pub fn step_height(
        &self,
        ray: &Ray,
        start_height: f32,
        min_height: f32,
        snap_interval: f32,
    ) -> Option<f32> {
        let dy = self.delta(ray)?.y;
        Some(clamp_snap(start_height + dy, min_height, snap_interval))
    }
}

/// Yaw rotation about a pivot, measured on a horizontal plane
#[derive(Debug, Clone, Copy)]
pub struct RotateDrag {
    pub plane: Plane,
    pub pivot: Vec3,
    /// Pivot-to-pointer direction at drag start, flattened
    pub start_direction: Vec3,
    /// Yaw in degrees at drag start
    pub start_yaw: f32,
}

impl RotateDrag {
    pub fn begin(ray: &Ray, fallback_point: Vec3, pivot: Vec3, start_yaw: f32) -> Self {
        let plane = Plane::horizontal(pivot);
        let start_point = plane.raycast(ray).unwrap_or(fallback_point);
        Self {
            plane,
            pivot,
            start_direction: (start_point - pivot).flatten(),
            start_yaw,
        }
    }

    /// New yaw: start yaw plus the signed angle the pointer swept around
    /// the pivot, snapped to `snap_degrees`
    pub fn step(&self, ray: &Ray, snap_degrees: f32) -> Option<f32> {
        let hit = self.plane.raycast(ray)?;
        let swept = signed_yaw_between(self.start_direction, hit - self.pivot)?;
        Some(snap_angle(self.start_yaw + swept, snap_degrees))
    }
}
