//! Pointer polling from macroquad
//!
//! Must be called from inside a macroquad frame (the functions it uses
//! read macroquad's global input context).

use macroquad::prelude::*;
use super::{MouseState, PointerSample, TouchPhase as CursorTouchPhase, TouchPoint};

/// Read this frame's mouse state
pub fn mouse_state() -> MouseState {
    let (x, y) = mouse_position();
    MouseState {
        x,
        y,
        left_down: is_mouse_button_down(MouseButton::Left),
        left_pressed: is_mouse_button_pressed(MouseButton::Left),
        left_released: is_mouse_button_released(MouseButton::Left),
    }
}

/// Read this frame's touches
pub fn touch_points() -> Vec<TouchPoint> {
    touches()
        .into_iter()
        .map(|t| TouchPoint {
            id: t.id,
            phase: match t.phase {
                TouchPhase::Started => CursorTouchPhase::Started,
                TouchPhase::Moved => CursorTouchPhase::Moved,
                TouchPhase::Stationary => CursorTouchPhase::Stationary,
                TouchPhase::Ended => CursorTouchPhase::Ended,
                TouchPhase::Cancelled => CursorTouchPhase::Cancelled,
            },
            x: t.position.x,
            y: t.position.y,
        })
        .collect()
}

/// Sample the pointer for this frame, touch first
pub fn sample_pointer() -> PointerSample {
    PointerSample::coalesce(&touch_points(), &mouse_state())
}
