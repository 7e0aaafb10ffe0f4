//! Perspective camera used for pointer rays and billboard alignment
//!
//! Screen coordinates are in pixels with the origin at the top-left
//! corner and Y growing downwards, the same convention macroquad's
//! `mouse_position()` uses.

use super::math::Vec3;
use super::ray::Ray;

/// Camera state for pointer picking
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub rotation_x: f32, // Pitch (radians, positive looks down)
    pub rotation_y: f32, // Yaw (radians)
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Viewport size in pixels
    pub viewport: (f32, f32),

    // Computed basis vectors
    pub basis_x: Vec3, // Right
    pub basis_y: Vec3, // Up
    pub basis_z: Vec3, // Forward
}

impl Camera {
    pub fn new() -> Self {
        let mut cam = Self {
            position: Vec3::ZERO,
            rotation_x: 0.0,
            rotation_y: 0.0,
            fov_y: 45.0_f32.to_radians(),
            viewport: (800.0, 600.0),
            basis_x: Vec3::new(-1.0, 0.0, 0.0),
            basis_y: Vec3::new(0.0, 1.0, 0.0),
            basis_z: Vec3::new(0.0, 0.0, 1.0),
        };
        cam.update_basis();
        cam
    }

    /// Camera at `position` looking towards `target`
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let dir = (target - position).normalize();
        let mut cam = Self::new();
        cam.position = position;
        cam.rotation_x = (-dir.y).clamp(-1.0, 1.0).asin();
        cam.rotation_y = dir.x.atan2(dir.z);
        cam.update_basis();
        cam
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = (width, height);
        self
    }

    pub fn update_basis(&mut self) {
        // Forward vector based on rotation
        self.basis_z = Vec3 {
            x: self.rotation_x.cos() * self.rotation_y.sin(),
            y: -self.rotation_x.sin(),
            z: self.rotation_x.cos() * self.rotation_y.cos(),
        };

        // Right vector. Straight up/down has no horizontal right, keep the last one
        let right = self.basis_z.cross(Vec3::UP);
        if right.len() > 1e-6 {
            self.basis_x = right.normalize();
        }

        // Up vector
        self.basis_y = self.basis_x.cross(self.basis_z);
    }

    /// Forward (view) direction in world space
    pub fn forward(&self) -> Vec3 {
        self.basis_z
    }

    /// Forward direction projected onto the ground plane, normalized.
    /// Zero when the camera looks straight up or down.
    pub fn flat_forward(&self) -> Vec3 {
        let flat = self.basis_z.flatten();
        if flat.len() < 1e-4 {
            return Vec3::ZERO;
        }
        flat.normalize()
    }

    /// Generate a world-space ray through a screen pixel
    pub fn screen_to_ray(&self, screen_x: f32, screen_y: f32) -> Ray {
        let (width, height) = self.viewport;
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let tan_half = (self.fov_y * 0.5).tan();

        // Normalized device coords, +Y up
        let ndc_x = if width > 0.0 { screen_x / width * 2.0 - 1.0 } else { 0.0 };
        let ndc_y = if height > 0.0 { 1.0 - screen_y / height * 2.0 } else { 0.0 };

        let dir = self.basis_z
            + self.basis_x * (ndc_x * tan_half * aspect)
            + self.basis_y * (ndc_y * tan_half);

        Ray::new(self.position, dir)
    }

    /// Project a world point to screen pixels (None if behind the camera)
    pub fn world_to_screen(&self, point: Vec3) -> Option<(f32, f32)> {
        let rel = point - self.position;
        let depth = rel.dot(self.basis_z);
        if depth <= 1e-4 {
            return None;
        }
        let (width, height) = self.viewport;
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let tan_half = (self.fov_y * 0.5).tan();

        let ndc_x = rel.dot(self.basis_x) / (depth * tan_half * aspect);
        let ndc_y = rel.dot(self.basis_y) / (depth * tan_half);
        Some(((ndc_x + 1.0) * 0.5 * width, (1.0 - ndc_y) * 0.5 * height))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_is_forward() {
        let cam = Camera::looking_at(Vec3::new(0.0, 10.0, -10.0), Vec3::ZERO)
            .with_viewport(640.0, 480.0);
        let ray = cam.screen_to_ray(320.0, 240.0);
        let fwd = cam.forward();
        assert!((ray.direction.dot(fwd) - 1.0).abs() < 0.001);
        assert!((fwd.y + std::f32::consts::FRAC_1_SQRT_2).abs() < 0.001);
    }

    #[test]
    fn test_world_to_screen_round_trip() {
        let cam = Camera::looking_at(Vec3::new(3.0, 6.0, -8.0), Vec3::new(0.0, 1.0, 0.0))
            .with_viewport(800.0, 600.0);
        let point = Vec3::new(1.0, 0.5, 2.0);
        let (sx, sy) = cam.world_to_screen(point).unwrap();
        let ray = cam.screen_to_ray(sx, sy);

        // The ray through the projected pixel passes through the point
        let to_point = (point - ray.origin).normalize();
        assert!((to_point.dot(ray.direction) - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_screen_up_is_world_up() {
        let cam = Camera::looking_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO)
            .with_viewport(100.0, 100.0);
        let top = cam.screen_to_ray(50.0, 0.0);
        assert!(top.direction.y > 0.0);
    }

    #[test]
    fn test_flat_forward_straight_down_is_zero() {
        let cam = Camera::looking_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        assert!(cam.flat_forward().len() < 0.001);
    }
}
