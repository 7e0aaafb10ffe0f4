//! Virtual grid plane
//!
//! While an object is dragged, a flat grid is shown at the object's base
//! height so the user can see the snap steps. It is owned by the drag and
//! dropped with it.

use crate::config::CursorConfig;
use crate::geometry::Vec3;
use crate::scene::BuildableVolume;

/// How the plane is drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridVisual {
    /// Instance of a named visual template
    Template(String),
    /// Plain generated quad
    GeneratedQuad,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VirtualGridPlane {
    /// Center of the plane; `y` is the displayed height
    pub center: Vec3,
    /// Extent along X and Z
    pub size: (f32, f32),
    /// Grid step drawn on the plane
    pub cell_size: f32,
    pub visual: GridVisual,
}

impl VirtualGridPlane {
    /// Build a plane covering the buildable volume's footprint at
    /// `base_height`. Without a volume, a square of the configured
    /// fallback size is centered under `target`.
    pub fn spawn(
        volume: Option<BuildableVolume>,
        target: Vec3,
        base_height: f32,
        config: &CursorConfig,
    ) -> Self {
        let (center, size) = match volume {
            Some(v) => (v.center, (v.size.x, v.size.z)),
            None => (target, (config.grid_fallback_size, config.grid_fallback_size)),
        };
        let visual = match &config.grid_template {
            Some(name) => GridVisual::Template(name.clone()),
            None => GridVisual::GeneratedQuad,
        };
        tracing::trace!(?visual, height = base_height, "grid plane spawned");
        Self {
            center: center.with_y(base_height),
            size,
            cell_size: config.snap_interval,
            visual,
        }
    }

    pub fn height(&self) -> f32 {
        self.center.y
    }

    pub fn set_height(&mut self, height: f32) {
        self.center.y = height;
    }

    /// Corners in winding order, for drawing
    pub fn corners(&self) -> [Vec3; 4] {
        let hx = self.size.0 * 0.5;
        let hz = self.size.1 * 0.5;
        let c = self.center;
        [
            Vec3::new(c.x - hx, c.y, c.z - hz),
            Vec3::new(c.x + hx, c.y, c.z - hz),
            Vec3::new(c.x + hx, c.y, c.z + hz),
            Vec3::new(c.x - hx, c.y, c.z + hz),
        ]
    }
}

impl Drop for VirtualGridPlane {
    fn drop(&mut self) {
        tracing::trace!(height = self.center.y, "grid plane released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_matches_volume_footprint() {
        let volume = BuildableVolume {
            center: Vec3::new(5.0, 10.0, -5.0),
            size: Vec3::new(30.0, 8.0, 40.0),
        };
        let plane = VirtualGridPlane::spawn(
            Some(volume),
            Vec3::new(1.0, 2.0, 3.0),
            1.5,
            &CursorConfig::default(),
        );
        assert_eq!(plane.size, (30.0, 40.0));
        assert_eq!(plane.center, Vec3::new(5.0, 1.5, -5.0));
        assert_eq!(plane.visual, GridVisual::GeneratedQuad);
    }

    #[test]
    fn test_spawn_without_volume_uses_fallback() {
        let config = CursorConfig {
            grid_template: Some("grid_dots".to_string()),
            grid_fallback_size: 12.0,
            ..CursorConfig::default()
        };
        let mut plane = VirtualGridPlane::spawn(None, Vec3::new(1.0, 2.0, 3.0), 0.0, &config);
        assert_eq!(plane.size, (12.0, 12.0));
        assert_eq!(plane.center, Vec3::new(1.0, 0.0, 3.0));
        assert_eq!(plane.visual, GridVisual::Template("grid_dots".to_string()));

        plane.set_height(4.0);
        assert_eq!(plane.height(), 4.0);
        assert!(plane.corners().iter().all(|c| c.y == 4.0));
    }
}
