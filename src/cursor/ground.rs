//! Ground control point: slides on the horizontal plane only.

use crate::geometry::Camera;
use crate::input::PointerSample;

use super::{CursorBase, CursorEvent, DragMode, HandleRole, PlaneDrag};

const PRIORITY: [HandleRole; 1] = [HandleRole::Xz];

#[derive(Debug, Clone, Default)]
pub struct GroundControlPoint {
    drag: Option<PlaneDrag>,
}

impl GroundControlPoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag.map(|_| DragMode::Xz)
    }

    pub(super) fn cancel_drag(&mut self) -> Option<DragMode> {
        self.drag.take().map(|_| DragMode::Xz)
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
                tracing::debug!(position = ?base.position, "ground control point drag ended");
                events.push(CursorEvent::DragEnded(DragMode::Xz));
                return;
            }
            let ray = camera.screen_to_ray(pointer.x, pointer.y);
            match drag.step_xz(&ray, base.config.snap_interval) {
                Some(position) => base.drag_to(position, events),
                None => tracing::trace!("no plane hit, step skipped"),
            }
            return;
        }

        if !pointer.pressed {
            return;
        }
        let ray = camera.screen_to_ray(pointer.x, pointer.y);
        if let Some(hit) = base.pick(&ray, &PRIORITY) {
            tracing::debug!(position = ?base.position, "ground control point drag started");
            self.drag = Some(PlaneDrag::horizontal(&ray, hit.point, base.position));
            events.push(CursorEvent::DragStarted(DragMode::Xz));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::test_support::*;
    use crate::cursor::Cursor;
    use crate::geometry::Vec3;
    use crate::scene::MemoryScene;

    #[test]
    fn test_drag_moves_on_ground_only() {
        let camera = overhead_camera();
        let mut scene = MemoryScene::new();
        let start = Vec3::new(1.0, 0.25, -1.0);
        let mut cursor = Cursor::ground_control_point().with_camera(camera.clone());
        cursor.update_position(start);
        cursor.set_visible(true);

        cursor.update(&press_at(&camera, start), &mut scene);
        assert_eq!(cursor.drag_mode(), Some(DragMode::Xz));

        cursor.update(&drag_at(&camera, start + Vec3::new(-1.2, 0.0, 2.4)), &mut scene);
        let p = cursor.position();
        assert!((p.x - 0.0).abs() < 1e-4, "{:?}", p);
        assert!((p.z - 1.5).abs() < 1e-4, "{:?}", p);
        assert_eq!(p.y, 0.25);
    }

    #[test]
    fn test_press_off_handle_is_ignored() {
        let camera = overhead_camera();
        let mut scene = MemoryScene::new();
        let mut cursor = Cursor::ground_control_point().with_camera(camera.clone());
        cursor.set_visible(true);
        let events = cursor.update(&press_at(&camera, Vec3::new(3.0, 0.0, 3.0)), &mut scene);
        assert!(events.is_empty());
        assert!(!cursor.is_dragging());
    }

    #[test]
    fn test_unsnapped_drag_is_continuous() {
        let camera = overhead_camera();
        let mut scene = MemoryScene::new();
        let mut cursor = Cursor::ground_control_point().with_camera(camera.clone());
        cursor.set_snap_interval(0.0);
        cursor.set_visible(true);

        cursor.update(&press_at(&camera, Vec3::ZERO), &mut scene);
        cursor.update(&drag_at(&camera, Vec3::new(0.37, 0.0, 0.0)), &mut scene);
        assert!((cursor.position().x - 0.37).abs() < 1e-3);
    }
}
