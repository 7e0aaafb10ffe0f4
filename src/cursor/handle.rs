//! Handle regions
//!
//! A handle is a grabbable volume attached to a cursor. Regions live in a
//! flat table per cursor and are positioned relative to the cursor's
//! origin, turned by its yaw. Picking ray-tests every region and then
//! resolves overlaps by a fixed role priority, not by distance.

use bitflags::bitflags;

use crate::geometry::{ray_box_intersection, ray_sphere_intersection, rotate_y, Ray, Vec3};

/// What grabbing a region does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    /// Move on the horizontal plane
    Xz,
    /// Move vertically
    Y,
    /// Spin about the vertical axis
    Rotate,
    /// One-shot delete button
    Delete,
    /// One-shot confirm button
    Confirm,
}

bitflags! {
    /// Which handle roles accept input
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HandleMask: u8 {
        const XZ = 1 << 0;
        const Y = 1 << 1;
        const ROTATE = 1 << 2;
        const DELETE = 1 << 3;
        const CONFIRM = 1 << 4;
    }
}

impl Default for HandleMask {
    fn default() -> Self {
        HandleMask::all()
    }
}

impl HandleRole {
    pub fn mask(self) -> HandleMask {
        match self {
            HandleRole::Xz => HandleMask::XZ,
            HandleRole::Y => HandleMask::Y,
            HandleRole::Rotate => HandleMask::ROTATE,
            HandleRole::Delete => HandleMask::DELETE,
            HandleRole::Confirm => HandleMask::CONFIRM,
        }
    }
}

/// Collision shape of a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleShape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

/// A role attached to a volume, in cursor-local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleRegion {
    pub role: HandleRole,
    pub offset: Vec3,
    pub shape: HandleShape,
}

impl HandleRegion {
    pub fn sphere(role: HandleRole, offset: Vec3, radius: f32) -> Self {
        Self { role, offset, shape: HandleShape::Sphere { radius } }
    }

    pub fn cuboid(role: HandleRole, offset: Vec3, half_extents: Vec3) -> Self {
        Self { role, offset, shape: HandleShape::Box { half_extents } }
    }

    /// World-space center for a cursor at `origin` turned by `yaw`
    pub fn center(&self, origin: Vec3, yaw: f32) -> Vec3 {
        origin + rotate_y(self.offset, yaw)
    }

    /// Distance along `ray` to this region, if hit
    pub fn raycast(&self, ray: &Ray, origin: Vec3, yaw: f32) -> Option<f32> {
        let center = self.center(origin, yaw);
        match self.shape {
            HandleShape::Sphere { radius } => ray_sphere_intersection(ray, center, radius),
            HandleShape::Box { half_extents } => ray_box_intersection(ray, center, half_extents, yaw),
        }
    }
}

/// A region the pointer ray went through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleHit {
    pub role: HandleRole,
    pub distance: f32,
    /// World point where the ray entered the region
    pub point: Vec3,
}

/// All regions of one cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandleTable {
    regions: Vec<HandleRegion>,
}

impl HandleTable {
    pub fn new(regions: Vec<HandleRegion>) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &[HandleRegion] {
        &self.regions
    }

    /// Every region hit by the ray, nearest first
    pub fn hits(&self, ray: &Ray, origin: Vec3, yaw: f32, mask: HandleMask) -> Vec<HandleHit> {
        let mut hits: Vec<HandleHit> = self
            .regions
            .iter()
            .filter(|r| mask.contains(r.role.mask()))
            .filter_map(|r| {
                r.raycast(ray, origin, yaw).map(|distance| HandleHit {
                    role: r.role,
                    distance,
                    point: ray.at(distance),
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Resolve a pointer-down to one region: the first role in `priority`
    /// that was hit wins. Roles not listed in `priority` are never picked.
    pub fn pick(
        &self,
        ray: &Ray,
        origin: Vec3,
        yaw: f32,
        priority: &[HandleRole],
        mask: HandleMask,
    ) -> Option<HandleHit> {
        let hits = self.hits(ray, origin, yaw, mask);
        priority
            .iter()
            .find_map(|role| hits.iter().find(|h| h.role == *role).copied())
    }

    /// Default layout for a full control point: a ball to slide on the
    /// ground and a post above it to lift
    pub fn full_control_point() -> Self {
        Self::new(vec![
            HandleRegion::sphere(HandleRole::Xz, Vec3::ZERO, 0.35),
            HandleRegion::cuboid(HandleRole::Y, Vec3::new(0.0, 0.9, 0.0), Vec3::new(0.15, 0.45, 0.15)),
        ])
    }

    pub fn ground_control_point() -> Self {
        Self::new(vec![HandleRegion::sphere(HandleRole::Xz, Vec3::ZERO, 0.4)])
    }

    pub fn height_control_point() -> Self {
        Self::new(vec![HandleRegion::cuboid(
            HandleRole::Y,
            Vec3::ZERO,
            Vec3::new(0.2, 0.5, 0.2),
        )])
    }

    /// Default layout for placed objects: a flat pad at the pivot, a lift
    /// post, a rotate knob to the side and two buttons overhead
    pub fn object() -> Self {
        Self::new(vec![
            HandleRegion::cuboid(HandleRole::Xz, Vec3::ZERO, Vec3::new(0.75, 0.1, 0.75)),
            HandleRegion::cuboid(HandleRole::Y, Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.15, 0.4, 0.15)),
            HandleRegion::sphere(HandleRole::Rotate, Vec3::new(1.2, 0.0, 0.0), 0.3),
            HandleRegion::sphere(HandleRole::Delete, Vec3::new(-0.6, 2.3, 0.0), 0.25),
            HandleRegion::sphere(HandleRole::Confirm, Vec3::new(0.6, 2.3, 0.0), 0.25),
        ])
    }
}
