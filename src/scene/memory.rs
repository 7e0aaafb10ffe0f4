//! In-memory scene
//!
//! Stores just enough of a world for cursors to run against: objects
//! with optional local render bounds, walls, structures, and the
//! optional services from `Scene`.

use std::collections::HashMap;

use crate::geometry::{Aabb, Vec3};
use super::{BuildableVolume, EntityId, Scene, StructureGeometry, Transform};

/// A placed object
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub transform: Transform,
    /// Render bounds relative to the pivot, before scale
    pub local_bounds: Option<Aabb>,
}

/// Simple HashMap-backed `Scene`
#[derive(Debug, Default)]
pub struct MemoryScene {
    next_id: u32,
    objects: HashMap<EntityId, SceneObject>,
    walls: HashMap<EntityId, Vec<Vec3>>,
    structures: HashMap<EntityId, StructureGeometry>,
    bounds_bottoms: HashMap<EntityId, f32>,
    buildable: Option<BuildableVolume>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_object(&mut self, transform: Transform, local_bounds: Option<Aabb>) -> EntityId {
        let id = self.allocate();
        self.objects.insert(id, SceneObject { transform, local_bounds });
        id
    }

    pub fn add_wall(&mut self, points: Vec<Vec3>) -> EntityId {
        let id = self.allocate();
        self.walls.insert(id, points);
        id
    }

    pub fn add_structure(&mut self, geometry: StructureGeometry) -> EntityId {
        let id = self.allocate();
        self.structures.insert(id, geometry);
        id
    }

    pub fn remove(&mut self, id: EntityId) {
        self.objects.remove(&id);
        self.walls.remove(&id);
        self.structures.remove(&id);
        self.bounds_bottoms.remove(&id);
    }

    pub fn object(&self, id: EntityId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (EntityId, &SceneObject)> {
        self.objects.iter().map(|(id, obj)| (*id, obj))
    }

    pub fn walls(&self) -> impl Iterator<Item = (EntityId, &[Vec3])> {
        self.walls.iter().map(|(id, pts)| (*id, pts.as_slice()))
    }

    pub fn structures(&self) -> impl Iterator<Item = (EntityId, &StructureGeometry)> {
        self.structures.iter().map(|(id, s)| (*id, s))
    }

    pub fn wall_points_mut(&mut self, id: EntityId) -> Option<&mut Vec<Vec3>> {
        self.walls.get_mut(&id)
    }

    pub fn structure_mut(&mut self, id: EntityId) -> Option<&mut StructureGeometry> {
        self.structures.get_mut(&id)
    }

    /// Answer from the dedicated bounds service for `id` (NaN = none)
    pub fn set_bounds_bottom(&mut self, id: EntityId, bottom: f32) {
        self.bounds_bottoms.insert(id, bottom);
    }

    pub fn set_buildable_volume(&mut self, volume: Option<BuildableVolume>) {
        self.buildable = volume;
    }
}

impl Scene for MemoryScene {
    fn transform(&self, id: EntityId) -> Option<Transform> {
        self.objects.get(&id).map(|o| o.transform)
    }

    fn set_transform(&mut self, id: EntityId, transform: Transform) -> bool {
        match self.objects.get_mut(&id) {
            Some(obj) => {
                obj.transform = transform;
                true
            }
            None => false,
        }
    }

    fn wall_control_points(&self, id: EntityId) -> Option<Vec<Vec3>> {
        self.walls.get(&id).cloned()
    }

    fn structure(&self, id: EntityId) -> Option<StructureGeometry> {
        self.structures.get(&id).copied()
    }

    fn bounds_bottom(&self, id: EntityId) -> Option<f32> {
        self.bounds_bottoms.get(&id).copied()
    }

    fn visual_bounds(&self, id: EntityId) -> Option<Aabb> {
        let obj = self.objects.get(&id)?;
        let local = obj.local_bounds?;
        let t = &obj.transform;
        // Yaw only spins the footprint, so the vertical extent is exact;
        // the horizontal extent is the unrotated one.
        Some(Aabb::new(
            t.position + local.min * t.scale,
            t.position + local.max * t.scale,
        ))
    }

    fn buildable_volume(&self) -> Option<BuildableVolume> {
        self.buildable
    }
}
