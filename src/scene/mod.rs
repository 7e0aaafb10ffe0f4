//! The world as cursors see it
//!
//! Cursors don't own anything they manipulate. Everything they read or
//! write goes through the `Scene` trait, implemented by whatever system
//! owns placed objects, walls and structures. `MemoryScene` is a
//! self-contained implementation for tools and tests.

mod follow;
mod memory;
mod transform;

pub use follow::{wall_midpoint, FollowTarget, StructureEdge, StructureGeometry};
pub use memory::{MemoryScene, SceneObject};
pub use transform::Transform;

use serde::{Serialize, Deserialize};
use crate::geometry::{Aabb, Vec3};

/// Opaque handle to something in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Region of the world where building is allowed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildableVolume {
    pub center: Vec3,
    pub size: Vec3,
}

/// Collaborator interface consumed by cursors.
///
/// Optional services default to "unavailable" so a minimal scene only
/// has to provide transforms.
pub trait Scene {
    /// Current transform of a placed object or point entity
    fn transform(&self, id: EntityId) -> Option<Transform>;

    /// Overwrite an entity's transform. Returns false if `id` is unknown.
    fn set_transform(&mut self, id: EntityId, transform: Transform) -> bool;

    /// Ordered control points of a wall
    fn wall_control_points(&self, _id: EntityId) -> Option<Vec<Vec3>> {
        None
    }

    /// Footprint and edge anchors of a structure
    fn structure(&self, _id: EntityId) -> Option<StructureGeometry> {
        None
    }

    /// World height of the bottom of an object's bounding box, from the
    /// dedicated bounds service. A non-finite value counts as unavailable.
    fn bounds_bottom(&self, _id: EntityId) -> Option<f32> {
        None
    }

    /// Bounds read straight from the object's visuals
    fn visual_bounds(&self, _id: EntityId) -> Option<Aabb> {
        None
    }

    /// The buildable area, used to size the virtual grid plane
    fn buildable_volume(&self) -> Option<BuildableVolume> {
        None
    }
}

/// Height of the visual bottom of `id`, trying the bounds service first
/// and the visuals second. None when neither knows.
pub fn bottom_height(scene: &dyn Scene, id: EntityId) -> Option<f32> {
    scene
        .bounds_bottom(id)
        .filter(|y| y.is_finite())
        .or_else(|| scene.visual_bounds(id).map(|b| b.min.y).filter(|y| y.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareScene;

    impl Scene for BareScene {
        fn transform(&self, _id: EntityId) -> Option<Transform> {
            None
        }
        fn set_transform(&mut self, _id: EntityId, _transform: Transform) -> bool {
            false
        }
    }

    #[test]
    fn test_bare_scene_has_no_services() {
        let scene = BareScene;
        assert!(scene.buildable_volume().is_none());
        assert!(bottom_height(&scene, EntityId(1)).is_none());
    }

    #[test]
    fn test_nan_bounds_fall_back_to_visuals() {
        let mut scene = MemoryScene::new();
        let id = scene.add_object(
            Transform::from_position(Vec3::new(0.0, 2.0, 0.0)),
            Some(Aabb::from_center(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5))),
        );
        scene.set_bounds_bottom(id, f32::NAN);
        let bottom = bottom_height(&scene, id).unwrap();
        assert!((bottom - 1.5).abs() < 0.001);

        scene.set_bounds_bottom(id, 0.25);
        assert!((bottom_height(&scene, id).unwrap() - 0.25).abs() < 0.001);
    }
}
