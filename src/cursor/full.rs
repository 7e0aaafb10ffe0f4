//! Full control point: a free 3D point with a horizontal and a vertical
//! handle. Optionally mirrors an entity's position between drags.

use crate::geometry::{Camera, Vec3};
use crate::input::PointerSample;
use crate::scene::{EntityId, Scene};

use super::{CursorBase, CursorEvent, DragMode, HandleRole, PlaneDrag};

/// Vertical wins where the two handles overlap
const PRIORITY: [HandleRole; 2] = [HandleRole::Y, HandleRole::Xz];

#[derive(Debug, Clone, Copy)]
enum FullDrag {
    Xz(PlaneDrag),
    Y(PlaneDrag),
}

impl FullDrag {
    fn mode(&self) -> DragMode {
        match self {
            FullDrag::Xz(_) => DragMode::Xz,
            FullDrag::Y(_) => DragMode::Y,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FullControlPoint {
    drag: Option<FullDrag>,
    follow: Option<EntityId>,
}

impl FullControlPoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag.map(|d| d.mode())
    }

    pub fn follow_target(&self) -> Option<EntityId> {
        self.follow
    }

    pub(super) fn cancel_drag(&mut self) -> Option<DragMode> {
        self.drag.take().map(|d| d.mode())
    }

    pub(super) fn set_follow(&mut self, target: Option<EntityId>) {
        if let Some(mode) = self.cancel_drag() {
            tracing::debug!(?mode, "drag cancelled by follow rebind");
        }
        self.follow = target;
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
                tracing::debug!(mode = ?drag.mode(), position = ?base.position, "full control point drag ended");
                events.push(CursorEvent::DragEnded(drag.mode()));
                return;
            }

            let ray = camera.screen_to_ray(pointer.x, pointer.y);
            let stepped = match drag {
                FullDrag::Xz(d) => d.step_xz(&ray, base.config.snap_interval),
                FullDrag::Y(d) => d
                    .step_height(&ray, d.start_position.y, base.config.min_height, base.config.snap_interval)
                    .map(|y| d.start_position.with_y(y)),
            };
            match stepped {
                Some(position) => base.drag_to(position, events),
                None => tracing::trace!(mode = ?drag.mode(), "no plane hit, step skipped"),
            }
            return;
        }

        if !pointer.pressed {
            return;
        }

        let ray = camera.screen_to_ray(pointer.x, pointer.y);
        let Some(hit) = base.pick(&ray, &PRIORITY) else {
            return;
        };
        let drag = match hit.role {
            HandleRole::Y => FullDrag::Y(PlaneDrag::vertical(camera, &ray, hit.point, base.position)),
            HandleRole::Xz => FullDrag::Xz(PlaneDrag::horizontal(&ray, hit.point, base.position)),
            _ => return,
        };
        tracing::debug!(mode = ?drag.mode(), position = ?base.position, "full control point drag started");
        self.drag = Some(drag);
        events.push(CursorEvent::DragStarted(drag.mode()));
    }

    /// Mirror the followed entity, unless a drag owns the position
    pub(super) fn follow(&self, base: &mut CursorBase, scene: &dyn Scene) {
        if self.drag.is_some() {
            return;
        }
        let Some(id) = self.follow else {
            return;
        };
        if let Some(transform) = scene.transform(id) {
            base.position = transform.position;
        }
    }
}
