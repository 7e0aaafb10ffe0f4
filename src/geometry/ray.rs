//! Ray casting utilities for handle picking and drag planes
//!
//! Every drag in this crate is "intersect the pointer ray with a plane
//! captured at drag start", so `Plane::raycast` is the workhorse here.

use super::math::{rotate_y, Vec3};

/// A 3D ray with origin and direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,  // Normalized
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize()
        }
    }

    /// Get point at distance t along ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// An infinite plane through `point` with unit `normal`.
///
/// A zero normal is allowed (e.g. a camera looking straight down has no
/// horizontal forward to build a facing plane from); such a plane never
/// intersects anything.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Horizontal plane at the height of `point`
    pub fn horizontal(point: Vec3) -> Self {
        Self::new(point, Vec3::UP)
    }

    /// Vertical plane through `point` facing along `forward` flattened
    /// onto the ground.
    pub fn vertical_facing(point: Vec3, forward: Vec3) -> Self {
        let flat = forward.flatten();
        if flat.len() < 1e-4 {
            return Self { point, normal: Vec3::ZERO };
        }
        Self::new(point, flat)
    }

    /// World point where the ray meets the plane
    pub fn raycast(&self, ray: &Ray) -> Option<Vec3> {
        let t = ray_plane_intersection(ray, self.point, self.normal)?;
        Some(ray.at(t))
    }
}

/// Find the intersection of a ray with a plane.
///
/// Returns the distance along the ray to the intersection point,
/// or None if the ray is parallel to the plane or intersection is behind ray origin.
pub fn ray_plane_intersection(
    ray: &Ray,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<f32> {
    let denom = ray.direction.dot(plane_normal);
    if denom.abs() < 0.0001 {
        return None;  // Ray parallel to plane
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;  // Intersection behind ray origin
    }

    Some(t)
}

/// Distance along the ray to the first hit with a sphere
pub fn ray_sphere_intersection(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let near = -b - sqrt_disc;
    if near >= 0.0 {
        return Some(near);
    }
    // Origin inside the sphere
    let far = -b + sqrt_disc;
    (far >= 0.0).then_some(far)
}

/// Distance along the ray to a box of `half_extents` centered on `center`
/// and turned by `yaw_degrees` about +Y.
pub fn ray_box_intersection(
    ray: &Ray,
    center: Vec3,
    half_extents: Vec3,
    yaw_degrees: f32,
) -> Option<f32> {
    // Move the ray into the box's frame, then do a slab test
    let origin = rotate_y(ray.origin - center, -yaw_degrees);
    let dir = rotate_y(ray.direction, -yaw_degrees);

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for (o, d, h) in [
        (origin.x, dir.x, half_extents.x),
        (origin.y, dir.y, half_extents.y),
        (origin.z, dir.z, half_extents.z),
    ] {
        if d.abs() < 1e-8 {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(t_min.max(0.0))
}

/// Signed angle in degrees from `from` to `to` about +Y, ignoring height.
///
/// Returns None if either direction has no horizontal extent.
pub fn signed_yaw_between(from: Vec3, to: Vec3) -> Option<f32> {
    let a = from.flatten();
    let b = to.flatten();
    if a.len() < 1e-6 || b.len() < 1e-6 {
        return None;
    }
    let sin = Vec3::UP.dot(a.cross(b));
    let cos = a.dot(b);
    Some(sin.atan2(cos).to_degrees())
}
