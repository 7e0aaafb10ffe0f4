//! Height control point: a vertical handle whose horizontal position is
//! pinned by a follow binding (a wall midpoint or a structure edge).

use crate::geometry::{Camera, Vec3};
use crate::input::PointerSample;
use crate::scene::{wall_midpoint, FollowTarget, Scene};

use super::{CursorBase, CursorEvent, DragMode, HandleRole, PlaneDrag};

const PRIORITY: [HandleRole; 1] = [HandleRole::Y];

/// Vertical drag plus the last height it produced. A structure follow
/// rewrites the cursor's Y every frame, so the cursor position can't
/// tell whether the snapped height moved.
#[derive(Debug, Clone, Copy)]
struct HeightDrag {
    plane: PlaneDrag,
    last_height: f32,
}

#[derive(Debug, Clone, Default)]
pub struct HeightControlPoint {
    drag: Option<HeightDrag>,
    follow: FollowTarget,
}

impl HeightControlPoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag.map(|_| DragMode::Y)
    }

    pub fn follow_target(&self) -> FollowTarget {
        self.follow
    }

    pub(super) fn set_follow(&mut self, follow: FollowTarget) {
        self.follow = follow;
    }

    pub(super) fn cancel_drag(&mut self) -> Option<DragMode> {
        self.drag.take().map(|_| DragMode::Y)
    }

    pub(super) fn handle_input(
        &mut self,
        base: &mut CursorBase,
        camera: &Camera,
        pointer: &PointerSample,
        events: &mut Vec<CursorEvent>,
    ) {
        if let Some(drag) = self.drag {
            if pointer.released || !pointer.held {
                self.drag = None;
                tracing::debug!(height = base.position.y, "height control point drag ended");
                events.push(CursorEvent::DragEnded(DragMode::Y));
                return;
            }
            let ray = camera.screen_to_ray(pointer.x, pointer.y);
            let stepped = drag.plane.step_height(
                &ray,
                drag.plane.start_position.y,
                base.config.min_height,
                base.config.snap_interval,
            );
            let Some(y) = stepped else {
                tracing::trace!("no plane hit, step skipped");
                return;
            };
            if y != drag.last_height {
                events.push(CursorEvent::SnapCue);
            }
            self.drag = Some(HeightDrag { last_height: y, ..drag });
            // X and Z belong to the follow binding, not the drag
            base.position = base.position.with_y(y);
            events.push(CursorEvent::PositionChanged(base.position));
            return;
        }

        if !pointer.pressed {
            return;
        }
        let ray = camera.screen_to_ray(pointer.x, pointer.y);
        if let Some(hit) = base.pick(&ray, &PRIORITY) {
            tracing::debug!(height = base.position.y, "height control point drag started");
            self.drag = Some(HeightDrag {
                plane: PlaneDrag::vertical(camera, &ray, hit.point, base.position),
                last_height: base.position.y,
            });
            events.push(CursorEvent::DragStarted(DragMode::Y));
        }
    }

    /// Re-pin to the followed geometry. Runs every frame, dragging or not.
    pub(super) fn follow(&self, base: &mut CursorBase, scene: &dyn Scene) {
        let pinned = match self.follow {
            FollowTarget::None => return,
            FollowTarget::Wall(id) => scene
                .wall_control_points(id)
                .and_then(|points| wall_midpoint(&points))
                .map(|mid| Vec3::new(mid.x, base.position.y, mid.z)),
            FollowTarget::Structure(id, edge) => scene.structure(id).map(|s| s.edge_position(edge)),
        };
        match pinned {
            Some(position) => base.position = position,
            None => tracing::trace!(follow = ?self.follow, "follow target unavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::test_support::*;
    use crate::cursor::Cursor;
    use crate::scene::{MemoryScene, StructureEdge, StructureGeometry};

    fn house(position: Vec3, yaw: f32) -> StructureGeometry {
        StructureGeometry {
            position,
            yaw,
            width: 4.0,
            depth: 3.0,
            left_anchor: Vec3::new(0.0, position.y + 2.5, 0.0),
            right_anchor: Vec3::new(0.0, position.y + 3.0, 0.0),
        }
    }

    #[test]
    fn test_wall_midpoint_keeps_own_height() {
        let mut scene = MemoryScene::new();
        let wall = scene.add_wall(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 6.0)]);
        let mut cursor = Cursor::height_control_point();
        cursor.update_position(Vec3::new(-7.0, 1.7, 9.0));
        cursor.set_target_wall(wall);
        cursor.set_visible(true);

        cursor.update(&PointerSample::default(), &mut scene);
        assert_eq!(cursor.position(), Vec3::new(2.0, 1.7, 3.0));

        // Wall edited elsewhere: the cursor tracks it next frame
        if let Some(points) = scene.wall_points_mut(wall) {
            points[1] = Vec3::new(8.0, 0.0, 0.0);
        }
        cursor.update(&PointerSample::default(), &mut scene);
        assert_eq!(cursor.position(), Vec3::new(4.0, 1.7, 0.0));
    }

    #[test]
    fn test_structure_edge_uses_anchor_height() {
        let mut scene = MemoryScene::new();
        let id = scene.add_structure(house(Vec3::new(10.0, 1.0, 0.0), 90.0));
        let mut cursor = Cursor::height_control_point();
        cursor.set_target_house(id, StructureEdge::Right);
        cursor.set_visible(true);
        cursor.update(&PointerSample::default(), &mut scene);

        // Local +2 on X, turned 90 degrees, lands on -Z
        let p = cursor.position();
        assert!((p.x - 10.0).abs() < 1e-4, "{:?}", p);
        assert!((p.z + 2.0).abs() < 1e-4, "{:?}", p);
        assert_eq!(p.y, 4.0);
    }

    /// Left edge sits on the origin, anchored at height 1
    fn low_house() -> StructureGeometry {
        StructureGeometry {
            position: Vec3::new(2.0, 0.0, 0.0),
            yaw: 0.0,
            width: 4.0,
            depth: 3.0,
            left_anchor: Vec3::new(0.0, 1.0, 0.0),
            right_anchor: Vec3::new(0.0, 1.0, 0.0),
        }
    }

    #[test]
    fn test_structure_drag_cues_once_per_height_change() {
        let camera = level_camera(1.0);
        let mut scene = MemoryScene::new();
        let id = scene.add_structure(low_house());
        let mut cursor = Cursor::height_control_point().with_camera(camera.clone());
        cursor.set_target_house(id, StructureEdge::Left);
        cursor.set_visible(true);
        cursor.update(&PointerSample::default(), &mut scene);
        assert_eq!(cursor.position(), Vec3::new(0.0, 1.0, 0.0));

        cursor.update(&press_at(&camera, Vec3::new(0.0, 1.0, 0.0)), &mut scene);
        assert_eq!(cursor.drag_mode(), Some(DragMode::Y));

        // The anchor pulls Y back to 1.0 after every frame, the snapped
        // height stays at 2.0
        let mut cues = 0;
        let mut moves = 0;
        for _ in 0..5 {
            for event in cursor.update(&drag_at(&camera, Vec3::new(0.0, 2.1, 0.0)), &mut scene) {
                match event {
                    CursorEvent::SnapCue => cues += 1,
                    CursorEvent::PositionChanged(p) => {
                        assert!((p.y - 2.0).abs() < 1e-4, "{:?}", p);
                        moves += 1;
                    }
                    other => panic!("unexpected {:?}", other),
                }
            }
            assert_eq!(cursor.position().y, 1.0);
        }
        assert_eq!(cues, 1);
        assert_eq!(moves, 5);

        // A new step cues again
        let events = cursor.update(&drag_at(&camera, Vec3::new(0.0, 2.6, 0.0)), &mut scene);
        assert_eq!(events.first(), Some(&CursorEvent::SnapCue));
    }

    #[test]
    fn test_structure_moved_elsewhere_is_tracked() {
        let mut scene = MemoryScene::new();
        let id = scene.add_structure(low_house());
        let mut cursor = Cursor::height_control_point();
        cursor.set_target_house(id, StructureEdge::Right);
        cursor.set_visible(true);
        cursor.update(&PointerSample::default(), &mut scene);
        assert_eq!(cursor.position(), Vec3::new(4.0, 1.0, 0.0));

        if let Some(house) = scene.structure_mut(id) {
            house.position = Vec3::new(2.0, 0.0, 5.0);
            house.right_anchor.y = 3.0;
        }
        cursor.update(&PointerSample::default(), &mut scene);
        assert_eq!(cursor.position(), Vec3::new(4.0, 3.0, 5.0));
    }

    #[test]
    fn test_wall_and_structure_bindings_exclude_each_other() {
        let mut scene = MemoryScene::new();
        let wall = scene.add_wall(vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)]);
        let structure = scene.add_structure(house(Vec3::new(10.0, 0.0, 0.0), 0.0));
        let mut cursor = Cursor::height_control_point();
        cursor.set_visible(true);

        cursor.set_target_house(structure, StructureEdge::Left);
        cursor.set_target_wall(wall);
        cursor.update(&PointerSample::default(), &mut scene);
        assert_eq!((cursor.position().x, cursor.position().z), (1.0, 0.0));

        cursor.set_target_house(structure, StructureEdge::Left);
        cursor.update(&PointerSample::default(), &mut scene);
        assert_eq!((cursor.position().x, cursor.position().z), (8.0, 0.0));
    }

    #[test]
    fn test_vertical_drag_with_wall_follow() {
        let camera = level_camera(1.0);
        let mut scene = MemoryScene::new();
        let wall = scene.add_wall(vec![Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)]);
        let mut cursor = Cursor::height_control_point().with_camera(camera.clone());
        cursor.update_position(Vec3::new(0.0, 1.0, 0.0));
        cursor.set_target_wall(wall);
        cursor.set_visible(true);

        cursor.update(&press_at(&camera, Vec3::new(0.0, 1.0, 0.0)), &mut scene);
        assert_eq!(cursor.drag_mode(), Some(DragMode::Y));
        cursor.update(&drag_at(&camera, Vec3::new(0.0, 2.1, 0.0)), &mut scene);
        let p = cursor.position();
        assert!((p.y - 2.0).abs() < 1e-4, "{:?}", p);
        assert_eq!((p.x, p.z), (0.0, 0.0));
    }

    #[test]
    fn test_missing_wall_leaves_position() {
        let mut scene = MemoryScene::new();
        let mut cursor = Cursor::height_control_point();
        cursor.update_position(Vec3::new(1.0, 2.0, 3.0));
        cursor.set_target_wall(crate::scene::EntityId(99));
        cursor.set_visible(true);
        cursor.update(&PointerSample::default(), &mut scene);
        assert_eq!(cursor.position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
