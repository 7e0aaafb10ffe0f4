//! Object cursor
//!
//! Manipulates a placed object's transform in the scene: horizontal move,
//! vertical lift, yaw rotation, plus delete and confirm buttons. The
//! cursor itself only mirrors the object's position.
//!
//! Vertical drags are anchored on the object's visual base rather than its
//! pivot: the snap grid applies to the bottom of the bounds, and the pivot
//! is placed above it by the pivot-to-base distance measured at drag start.
//! Without any bounds information the pivot doubles as the base.

use crate::geometry::{Camera, Ray};
use crate::input::PointerSample;
use crate::scene::{bottom_height, EntityId, Scene, Transform};

use super::{
    CursorBase, CursorEvent, DragMode, HandleRole, PlaneDrag, RotateDrag, VirtualGridPlane,
};

/// Buttons first, then rotate, lift, move
const PRIORITY: [HandleRole; 5] = [
    HandleRole::Delete,
    HandleRole::Confirm,
    HandleRole::Rotate,
    HandleRole::Y,
    HandleRole::Xz,
];

#[derive(Debug, Clone, Copy)]
enum ObjectDragKind {
    Xz(PlaneDrag),
    Y {
        drag: PlaneDrag,
        /// Height of the visual base at drag start
        start_bottom: f32,
        /// Pivot height above the visual base
        pivot_above_bottom: f32,
    },
    Rotate(RotateDrag),
}

impl ObjectDragKind {
    fn mode(&self) -> DragMode {
        match self {
            ObjectDragKind::Xz(_) => DragMode::Xz,
            ObjectDragKind::Y { .. } => DragMode::Y,
            ObjectDragKind::Rotate(_) => DragMode::Rotate,
        }
    }
}

/// One drag session; the grid plane lives and dies with it
#[derive(Debug, Clone)]
struct ObjectDrag {
    kind: ObjectDragKind,
    grid: VirtualGridPlane,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectCursor {
    target: Option<EntityId>,
    drag: Option<ObjectDrag>,
}

impl ObjectCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag.as_ref().map(|d| d.kind.mode())
    }

    pub fn grid_plane(&self) -> Option<&VirtualGridPlane> {
        self.drag.as_ref().map(|d| &d.grid)
    }

    /// Bind a new target. Switching targets mid-drag cancels the drag.
    pub(super) fn set_target(&mut self, target: Option<EntityId>) {
        if target != self.target {
            if let Some(mode) = self.cancel_drag() {
                tracing::debug!(?mode, "drag cancelled by target change");
            }
        }
        self.target = target;
    }

    /// Single teardown path for every way a drag can stop
    pub(super) fn cancel_drag(&mut self) -> Option<DragMode> {
        self.drag.take().map(|d| d.kind.mode())
    }

    pub(super) fn handle_input(
        &mut self,
        base: &mut CursorBase,
        camera: &Camera,
        pointer: &PointerSample,
        scene: &mut dyn Scene,
        events: &mut Vec<CursorEvent>,
    ) {
        let Some(target) = self.target else {
            tracing::trace!("no target, input skipped");
            return;
        };
        let Some(transform) = scene.transform(target) else {
            if let Some(mode) = self.cancel_drag() {
                tracing::debug!(?target, ?mode, "target vanished, drag cancelled");
            }
            tracing::trace!(?target, "target not in scene, input skipped");
            return;
        };

        if self.drag.is_some() {
            if pointer.released || !pointer.held {
                if let Some(mode) = self.cancel_drag() {
                    tracing::debug!(?target, ?mode, position = ?transform.position, "object drag ended");
                    events.push(CursorEvent::DragEnded(mode));
                }
                return;
            }
            let ray = camera.screen_to_ray(pointer.x, pointer.y);
            self.step(base, &ray, target, transform, scene, events);
            return;
        }

        if pointer.pressed {
            let ray = camera.screen_to_ray(pointer.x, pointer.y);
            self.press(base, camera, &ray, target, transform, &*scene, events);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn press(
        &mut self,
        base: &CursorBase,
        camera: &Camera,
        ray: &Ray,
        target: EntityId,
        transform: Transform,
        scene: &dyn Scene,
        events: &mut Vec<CursorEvent>,
    ) {
        let Some(hit) = base.pick_at(ray, transform.position, &PRIORITY) else {
            return;
        };

        let pivot = transform.position;
        let base_height = bottom_height(scene, target).unwrap_or(pivot.y);
        let kind = match hit.role {
            HandleRole::Delete => {
                tracing::debug!(?target, "delete requested");
                events.push(CursorEvent::DeleteRequested);
                return;
            }
            HandleRole::Confirm => {
                tracing::debug!(?target, "confirm requested");
                events.push(CursorEvent::ConfirmRequested);
                return;
            }
            HandleRole::Rotate => {
                ObjectDragKind::Rotate(RotateDrag::begin(ray, hit.point, pivot, transform.yaw()))
            }
            HandleRole::Y => ObjectDragKind::Y {
                drag: PlaneDrag::vertical(camera, ray, hit.point, pivot),
                start_bottom: base_height,
                pivot_above_bottom: pivot.y - base_height,
            },
            HandleRole::Xz => ObjectDragKind::Xz(PlaneDrag::horizontal(ray, hit.point, pivot)),
        };

        let grid = VirtualGridPlane::spawn(scene.buildable_volume(), pivot, base_height, &base.config);
        tracing::debug!(?target, mode = ?kind.mode(), ?pivot, base_height, "object drag started");
        events.push(CursorEvent::DragStarted(kind.mode()));
        self.drag = Some(ObjectDrag { kind, grid });
    }

    fn step(
        &mut self,
        base: &CursorBase,
        ray: &Ray,
        target: EntityId,
        current: Transform,
        scene: &mut dyn Scene,
        events: &mut Vec<CursorEvent>,
    ) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let config = &base.config;
        let kind = drag.kind;

        match kind {
            ObjectDragKind::Xz(d) => {
                let Some(position) = d.step_xz(ray, config.snap_interval) else {
                    tracing::trace!("no plane hit, step skipped");
                    return;
                };
                if !scene.set_transform(target, current.with_position(position)) {
                    return;
                }
                if position != current.position {
                    events.push(CursorEvent::SnapCue);
                }
                events.push(CursorEvent::PositionChanged(position));
            }
            ObjectDragKind::Y { drag: d, start_bottom, pivot_above_bottom } => {
                let Some(bottom) =
                    d.step_height(ray, start_bottom, config.min_height, config.snap_interval)
                else {
                    tracing::trace!("no plane hit, step skipped");
                    return;
                };
                drag.grid.set_height(bottom);
                let position = current.position.with_y(bottom + pivot_above_bottom);
                if !scene.set_transform(target, current.with_position(position)) {
                    return;
                }
                if position != current.position {
                    events.push(CursorEvent::SnapCue);
                }
                events.push(CursorEvent::PositionChanged(position));
            }
            ObjectDragKind::Rotate(d) => {
                let Some(yaw) = d.step(ray, config.rotation_snap_degrees) else {
                    tracing::trace!("no rotation sample, step skipped");
                    return;
                };
                if !scene.set_transform(target, current.with_yaw(yaw)) {
                    return;
                }
                if (yaw - current.yaw()).abs() > config.rotation_cue_epsilon {
                    events.push(CursorEvent::SnapCue);
                }
                events.push(CursorEvent::RotationChanged { yaw });
            }
        }
    }

    /// Track the target between and during drags
    pub(super) fn mirror(&self, base: &mut CursorBase, scene: &dyn Scene) {
        if let Some(transform) = self.target.and_then(|id| scene.transform(id)) {
            base.position = transform.position;
        }
    }
}
