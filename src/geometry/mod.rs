//! Geometry shared by every cursor
//!
//! # Module Organization
//!
//! - `math` - Vec3, Aabb, yaw rotation helpers
//! - `ray` - Ray, Plane, ray intersection tests, signed yaw angle
//! - `camera` - Perspective camera: pointer rays and flattened forward
//! - `snap` - Grid/angle quantization and clamp-then-snap

pub mod camera;
pub mod math;
pub mod ray;
pub mod snap;

pub use camera::Camera;
pub use math::{rotate_y, yaw_of, Aabb, Vec3};
pub use ray::{
    ray_box_intersection, ray_plane_intersection, ray_sphere_intersection, signed_yaw_between,
    Plane, Ray,
};
pub use snap::{clamp_snap, snap_angle, snap_value, snap_xz};
