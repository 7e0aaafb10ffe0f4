//! Drag-handle cursors
//!
//! A cursor is a small 3D widget with one or more handles. Dragging a
//! handle moves a point in space or a placed object, with grid snapping.
//!
//! Every cursor shares the same record (`CursorBase`: visibility, camera,
//! config, handle table, position) plus one variant from `CursorKind`:
//! - `FullControlPoint`: free point, horizontal and vertical handles
//! - `GroundControlPoint`: point on the ground, horizontal handle only
//! - `HeightControlPoint`: vertical handle, horizontally pinned to a wall
//!   midpoint or a structure edge
//! - `ObjectCursor`: move/lift/rotate a placed object, plus delete and
//!   confirm buttons
//!
//! Per frame, `Cursor::update` runs the variant's input handling first and
//! its follow/mirror step second, so a drag started this frame already
//! shows in this frame's position. There is at most one drag per cursor.

mod drag;
mod event;
mod full;
mod grid_plane;
mod ground;
mod handle;
mod height;
mod object;

pub use drag::{DragMode, PlaneDrag, RotateDrag};
pub use event::CursorEvent;
pub use full::FullControlPoint;
pub use grid_plane::{GridVisual, VirtualGridPlane};
pub use ground::GroundControlPoint;
pub use handle::{HandleHit, HandleMask, HandleRegion, HandleRole, HandleShape, HandleTable};
pub use height::HeightControlPoint;
pub use object::ObjectCursor;

use crate::config::CursorConfig;
use crate::geometry::{yaw_of, Camera, Ray, Vec3};
use crate::input::PointerSample;
use crate::scene::{EntityId, FollowTarget, Scene, StructureEdge};

/// Which variant a cursor is, without its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKindTag {
    FullControlPoint,
    GroundControlPoint,
    HeightControlPoint,
    Object,
}

/// How a cursor turns to face the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Never rotated
    #[default]
    Fixed,
    /// Turned every frame to face away from the camera's flattened forward
    Billboard,
}

/// State shared by every cursor variant
#[derive(Debug, Clone)]
pub struct CursorBase {
    visible: bool,
    pub(crate) position: Vec3,
    /// Degrees about +Y; only changes under `Orientation::Billboard`
    pub(crate) yaw: f32,
    camera: Option<Camera>,
    pub(crate) config: CursorConfig,
    pub(crate) handles: HandleTable,
    pub(crate) input_mask: HandleMask,
    orientation: Orientation,
}

impl CursorBase {
    fn new(config: CursorConfig, handles: HandleTable) -> Self {
        Self {
            visible: false,
            position: Vec3::ZERO,
            yaw: 0.0,
            camera: None,
            config,
            handles,
            input_mask: HandleMask::all(),
            orientation: Orientation::Fixed,
        }
    }

    /// Resolve a pointer ray to one handle of a cursor placed at `origin`
    pub(crate) fn pick_at(&self, ray: &Ray, origin: Vec3, priority: &[HandleRole]) -> Option<HandleHit> {
        self.handles.pick(ray, origin, self.yaw, priority, self.input_mask)
    }

    pub(crate) fn pick(&self, ray: &Ray, priority: &[HandleRole]) -> Option<HandleHit> {
        self.pick_at(ray, self.position, priority)
    }

    /// Apply a drag-computed position to the cursor itself
    pub(crate) fn drag_to(&mut self, position: Vec3, events: &mut Vec<CursorEvent>) {
        if position != self.position {
            events.push(CursorEvent::SnapCue);
        }
        self.position = position;
        events.push(CursorEvent::PositionChanged(position));
    }
}

/// The per-variant part of a cursor
#[derive(Debug, Clone)]
pub enum CursorKind {
    FullControlPoint(FullControlPoint),
    GroundControlPoint(GroundControlPoint),
    HeightControlPoint(HeightControlPoint),
    Object(ObjectCursor),
}

impl CursorKind {
    pub fn tag(&self) -> CursorKindTag {
        match self {
            CursorKind::FullControlPoint(_) => CursorKindTag::FullControlPoint,
            CursorKind::GroundControlPoint(_) => CursorKindTag::GroundControlPoint,
            CursorKind::HeightControlPoint(_) => CursorKindTag::HeightControlPoint,
            CursorKind::Object(_) => CursorKindTag::Object,
        }
    }

    fn default_handles(tag: CursorKindTag) -> HandleTable {
        match tag {
            CursorKindTag::FullControlPoint => HandleTable::full_control_point(),
            CursorKindTag::GroundControlPoint => HandleTable::ground_control_point(),
            CursorKindTag::HeightControlPoint => HandleTable::height_control_point(),
            CursorKindTag::Object => HandleTable::object(),
        }
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        match self {
            CursorKind::FullControlPoint(c) => c.drag_mode(),
            CursorKind::GroundControlPoint(c) => c.drag_mode(),
            CursorKind::HeightControlPoint(c) => c.drag_mode(),
            CursorKind::Object(c) => c.drag_mode(),
        }
    }

    /// Drop any open drag without emitting events
    fn cancel_drag(&mut self) -> Option<DragMode> {
        match self {
            CursorKind::FullControlPoint(c) => c.cancel_drag(),
            CursorKind::GroundControlPoint(c) => c.cancel_drag(),
            CursorKind::HeightControlPoint(c) => c.cancel_drag(),
            CursorKind::Object(c) => c.cancel_drag(),
        }
    }

    fn handle_input(
        &mut self,
        base: &mut CursorBase,
        camera: &Camera,
        pointer: &PointerSample,
        scene: &mut dyn Scene,
        events: &mut Vec<CursorEvent>,
    ) {
        match self {
            CursorKind::FullControlPoint(c) => c.handle_input(base, camera, pointer, events),
            CursorKind::GroundControlPoint(c) => c.handle_input(base, camera, pointer, events),
            CursorKind::HeightControlPoint(c) => c.handle_input(base, camera, pointer, events),
            CursorKind::Object(c) => c.handle_input(base, camera, pointer, scene, events),
        }
    }

    fn follow(&mut self, base: &mut CursorBase, scene: &dyn Scene) {
        match self {
            CursorKind::FullControlPoint(c) => c.follow(base, scene),
            CursorKind::GroundControlPoint(_) => {}
            CursorKind::HeightControlPoint(c) => c.follow(base, scene),
            CursorKind::Object(c) => c.mirror(base, scene),
        }
    }
}

/// A cursor: shared state plus one variant
#[derive(Debug, Clone)]
pub struct Cursor {
    base: CursorBase,
    kind: CursorKind,
}

impl Cursor {
    /// Create a hidden cursor with the variant's default handle layout
    pub fn new(kind: CursorKind, config: CursorConfig) -> Self {
        let handles = CursorKind::default_handles(kind.tag());
        Self {
            base: CursorBase::new(config, handles),
            kind,
        }
    }

    pub fn full_control_point() -> Self {
        Self::new(
            CursorKind::FullControlPoint(FullControlPoint::new()),
            CursorConfig::for_kind(CursorKindTag::FullControlPoint),
        )
    }

    pub fn ground_control_point() -> Self {
        Self::new(
            CursorKind::GroundControlPoint(GroundControlPoint::new()),
            CursorConfig::for_kind(CursorKindTag::GroundControlPoint),
        )
    }

    pub fn height_control_point() -> Self {
        Self::new(
            CursorKind::HeightControlPoint(HeightControlPoint::new()),
            CursorConfig::for_kind(CursorKindTag::HeightControlPoint),
        )
    }

    pub fn object() -> Self {
        Self::new(
            CursorKind::Object(ObjectCursor::new()),
            CursorConfig::for_kind(CursorKindTag::Object),
        )
    }

    pub fn with_config(mut self, config: CursorConfig) -> Self {
        self.base.config = config;
        self
    }

    pub fn with_handles(mut self, handles: HandleTable) -> Self {
        self.base.handles = handles;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.base.orientation = orientation;
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.base.camera = Some(camera);
        self
    }

    // ------------------------------------------------------------------
    // Visibility and drag state
    // ------------------------------------------------------------------

    /// Show or hide. Hiding ends any drag on the spot and releases the
    /// grid plane; whatever the drag last wrote to its target stays.
    pub fn set_visible(&mut self, visible: bool) {
        if !visible {
            if let Some(mode) = self.kind.cancel_drag() {
                tracing::debug!(kind = ?self.kind.tag(), ?mode, "drag cancelled by hide");
            }
        }
        self.base.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.base.visible
    }

    pub fn is_dragging(&self) -> bool {
        self.kind.drag_mode().is_some()
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.kind.drag_mode()
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    /// Move the cursor from outside the drag flow
    pub fn update_position(&mut self, position: Vec3) {
        self.base.position = position;
    }

    pub fn position(&self) -> Vec3 {
        self.base.position
    }

    pub fn yaw(&self) -> f32 {
        self.base.yaw
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.base.camera = camera;
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.base.camera.as_ref()
    }

    pub fn config(&self) -> &CursorConfig {
        &self.base.config
    }

    pub fn set_config(&mut self, config: CursorConfig) {
        self.base.config = config;
    }

    pub fn set_snap_interval(&mut self, snap_interval: f32) {
        self.base.config.snap_interval = snap_interval;
    }

    pub fn set_rotation_snap(&mut self, degrees: f32) {
        self.base.config.rotation_snap_degrees = degrees;
    }

    pub fn set_min_height(&mut self, min_height: f32) {
        self.base.config.min_height = min_height;
    }

    /// Limit which handles react to the pointer
    pub fn set_input_mask(&mut self, mask: HandleMask) {
        self.base.input_mask = mask;
    }

    pub fn input_mask(&self) -> HandleMask {
        self.base.input_mask
    }

    pub fn handles(&self) -> &HandleTable {
        &self.base.handles
    }

    pub fn orientation(&self) -> Orientation {
        self.base.orientation
    }

    pub fn kind(&self) -> &CursorKind {
        &self.kind
    }

    pub fn tag(&self) -> CursorKindTag {
        self.kind.tag()
    }

    // ------------------------------------------------------------------
    // Target bindings. Each returns false if this cursor is the wrong kind.
    // ------------------------------------------------------------------

    /// Object cursor: choose the placed object to manipulate
    pub fn set_target_object(&mut self, target: Option<EntityId>) -> bool {
        match &mut self.kind {
            CursorKind::Object(c) => {
                c.set_target(target);
                true
            }
            _ => false,
        }
    }

    /// Full control point: mirror an entity's position between drags
    pub fn set_follow_target(&mut self, target: Option<EntityId>) -> bool {
        match &mut self.kind {
            CursorKind::FullControlPoint(c) => {
                c.set_follow(target);
                true
            }
            _ => false,
        }
    }

    /// Height control point: sit on a wall's midpoint
    pub fn set_target_wall(&mut self, wall: EntityId) -> bool {
        self.set_height_follow(FollowTarget::Wall(wall))
    }

    /// Height control point: sit on one edge of a structure
    pub fn set_target_house(&mut self, structure: EntityId, edge: StructureEdge) -> bool {
        self.set_height_follow(FollowTarget::Structure(structure, edge))
    }

    pub fn clear_follow(&mut self) -> bool {
        self.set_height_follow(FollowTarget::None)
    }

    fn set_height_follow(&mut self, follow: FollowTarget) -> bool {
        match &mut self.kind {
            CursorKind::HeightControlPoint(c) => {
                c.set_follow(follow);
                true
            }
            _ => false,
        }
    }

    /// Grid plane of the object drag in progress, if any
    pub fn grid_plane(&self) -> Option<&VirtualGridPlane> {
        match &self.kind {
            CursorKind::Object(c) => c.grid_plane(),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Frame update
    // ------------------------------------------------------------------

    /// Run one frame: handle input, then follow/mirror, then orientation.
    /// Does nothing while hidden. Without a camera, input is skipped but
    /// following still happens.
    pub fn update(&mut self, pointer: &PointerSample, scene: &mut dyn Scene) -> Vec<CursorEvent> {
        let mut events = Vec::new();
        if !self.base.visible {
            return events;
        }

        match self.base.camera.clone() {
            Some(camera) => {
                self.kind.handle_input(&mut self.base, &camera, pointer, scene, &mut events);
            }
            None => tracing::trace!(kind = ?self.kind.tag(), "no camera, input skipped"),
        }

        self.kind.follow(&mut self.base, scene);
        self.align_orientation();
        events
    }

    fn align_orientation(&mut self) {
        if self.base.orientation != Orientation::Billboard {
            return;
        }
        let Some(camera) = &self.base.camera else {
            return;
        };
        // Straight-down camera: keep the last yaw
        if let Some(yaw) = yaw_of(camera.flat_forward()) {
            self.base.yaw = yaw;
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared fixtures for cursor tests

    use super::*;

    /// Camera high above and behind the origin, looking down at it
    pub fn overhead_camera() -> Camera {
        Camera::looking_at(Vec3::new(0.0, 12.0, -12.0), Vec3::ZERO).with_viewport(800.0, 600.0)
    }

    /// Camera level with the ground, looking along +Z
    pub fn level_camera(height: f32) -> Camera {
        Camera::looking_at(Vec3::new(0.0, height, -12.0), Vec3::new(0.0, height, 0.0))
            .with_viewport(800.0, 600.0)
    }

    /// Screen pixel of a world point
    pub fn screen(camera: &Camera, point: Vec3) -> (f32, f32) {
        camera.world_to_screen(point).expect("point in front of camera")
    }

    pub fn press_at(camera: &Camera, point: Vec3) -> PointerSample {
        let (x, y) = screen(camera, point);
        PointerSample::press(x, y)
    }

    pub fn drag_at(camera: &Camera, point: Vec3) -> PointerSample {
        let (x, y) = screen(camera, point);
        PointerSample::drag(x, y)
    }

    pub fn release_at(camera: &Camera, point: Vec3) -> PointerSample {
        let (x, y) = screen(camera, point);
        PointerSample::release(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::test_support::*;
    use crate::scene::MemoryScene;

    fn all_kinds() -> Vec<Cursor> {
        vec![
            Cursor::full_control_point(),
            Cursor::ground_control_point(),
            Cursor::height_control_point(),
            Cursor::object(),
        ]
    }

    #[test]
    fn test_cursors_start_hidden_and_idle() {
        for cursor in all_kinds() {
            assert!(!cursor.is_visible());
            assert!(!cursor.is_dragging());
            assert_eq!(cursor.orientation(), Orientation::Fixed);
        }
    }

    #[test]
    fn test_hidden_cursor_ignores_input() {
        let camera = overhead_camera();
        let mut scene = MemoryScene::new();
        let mut cursor = Cursor::ground_control_point().with_camera(camera.clone());
        let events = cursor.update(&press_at(&camera, Vec3::ZERO), &mut scene);
        assert!(events.is_empty());
        assert!(!cursor.is_dragging());
    }

    #[test]
    fn test_no_camera_skips_input() {
        let camera = overhead_camera();
        let mut scene = MemoryScene::new();
        let mut cursor = Cursor::ground_control_point();
        cursor.set_visible(true);
        let events = cursor.update(&press_at(&camera, Vec3::ZERO), &mut scene);
        assert!(events.is_empty());
        assert!(!cursor.is_dragging());

        // Self-heals once a camera arrives
        cursor.set_camera(Some(camera.clone()));
        let events = cursor.update(&press_at(&camera, Vec3::ZERO), &mut scene);
        assert_eq!(events, vec![CursorEvent::DragStarted(DragMode::Xz)]);
    }

    #[test]
    fn test_hide_clears_drag_for_every_kind() {
        let camera = overhead_camera();
        let mut scene = MemoryScene::new();
        let target = scene.add_object(crate::scene::Transform::IDENTITY, None);

        for mut cursor in all_kinds() {
            cursor.set_camera(Some(camera.clone()));
            cursor.set_target_object(Some(target));
            cursor.set_visible(true);

            // Aim at the handle the variant grabs first
            let region = cursor.handles().regions()[0];
            let center = region.center(cursor.position(), cursor.yaw());
            cursor.update(&press_at(&camera, center), &mut scene);
            assert!(cursor.is_dragging(), "{:?} did not start a drag", cursor.tag());

            cursor.set_visible(false);
            assert!(!cursor.is_dragging());
            assert!(cursor.grid_plane().is_none());
        }
    }

    #[test]
    fn test_binding_setters_check_kind() {
        let mut ground = Cursor::ground_control_point();
        assert!(!ground.set_target_object(Some(EntityId(1))));
        assert!(!ground.set_target_wall(EntityId(1)));
        assert!(!ground.set_follow_target(Some(EntityId(1))));

        let mut height = Cursor::height_control_point();
        assert!(height.set_target_wall(EntityId(1)));
        assert!(height.set_target_house(EntityId(2), StructureEdge::Left));
        assert!(height.clear_follow());
    }

    #[test]
    fn test_update_position_override() {
        let mut cursor = Cursor::full_control_point();
        cursor.update_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cursor.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_billboard_faces_away_from_camera() {
        let mut scene = MemoryScene::new();
        // Camera at +X looking back towards the origin: forward is -X
        let camera = Camera::looking_at(Vec3::new(10.0, 5.0, 0.0), Vec3::ZERO);
        let mut cursor = Cursor::ground_control_point()
            .with_orientation(Orientation::Billboard)
            .with_camera(camera);
        cursor.set_visible(true);
        cursor.update(&PointerSample::default(), &mut scene);
        // yaw -90 turns +Z onto -X
        assert!((cursor.yaw() + 90.0).abs() < 0.01, "yaw={}", cursor.yaw());

        // Fixed cursors never turn
        let mut fixed = Cursor::ground_control_point()
            .with_camera(Camera::looking_at(Vec3::new(10.0, 5.0, 0.0), Vec3::ZERO));
        fixed.set_visible(true);
        fixed.update(&PointerSample::default(), &mut scene);
        assert_eq!(fixed.yaw(), 0.0);
    }

    #[test]
    fn test_input_mask_blocks_handles() {
        let camera = overhead_camera();
        let mut scene = MemoryScene::new();
        let mut cursor = Cursor::ground_control_point().with_camera(camera.clone());
        cursor.set_visible(true);
        cursor.set_input_mask(HandleMask::Y);
        cursor.update(&press_at(&camera, Vec3::ZERO), &mut scene);
        assert!(!cursor.is_dragging());
    }
}
