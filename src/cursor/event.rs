//! Cursor events
//!
//! `Cursor::update` returns these instead of calling out to listeners.
//! The build-mode controller that owns the cursor drains them each frame.

use crate::geometry::Vec3;
use super::DragMode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorEvent {
    /// A handle was grabbed
    DragStarted(DragMode),
    /// The pointer came up and the drag finished
    DragEnded(DragMode),
    /// A drag step moved the cursor or its target
    PositionChanged(Vec3),
    /// A rotate step set the target's yaw (degrees)
    RotationChanged { yaw: f32 },
    /// Delete button pressed
    DeleteRequested,
    /// Confirm button pressed
    ConfirmRequested,
    /// The snapped value moved to a new grid step; play the tick sound
    SnapCue,
}
