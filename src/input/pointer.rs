//! Pointer sampling
//!
//! Cursors never look at touch or mouse state directly. Each frame the
//! host builds one `PointerSample` from whatever devices it has; a live
//! touch always wins over the mouse.

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
}

/// Lifecycle stage of a single touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Stationary,
    Ended,
    Cancelled,
}

/// One finger on the screen
#[derive(Debug, Clone, Copy)]
pub struct TouchPoint {
    pub id: u64,
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
}

/// Which device produced a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// Pointer position plus down/held/up edges for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    /// Went down this frame
    pub pressed: bool,
    /// Is down (including the frame it went down)
    pub held: bool,
    /// Came up this frame
    pub released: bool,
    pub source: PointerSource,
}

impl PointerSample {
    /// Pointer hovering at a position, no buttons involved
    pub fn hover(x: f32, y: f32) -> Self {
        Self { x, y, ..Default::default() }
    }

    /// Pointer going down at a position
    pub fn press(x: f32, y: f32) -> Self {
        Self { x, y, pressed: true, held: true, ..Default::default() }
    }

    /// Pointer held at a position (drag in progress)
    pub fn drag(x: f32, y: f32) -> Self {
        Self { x, y, held: true, ..Default::default() }
    }

    /// Pointer coming up at a position
    pub fn release(x: f32, y: f32) -> Self {
        Self { x, y, released: true, ..Default::default() }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Merge touch and mouse input, touch first.
    ///
    /// Only the first touch is considered; multi-finger gestures belong
    /// to the camera rig, not to cursors.
    pub fn coalesce(touches: &[TouchPoint], mouse: &MouseState) -> Self {
        if let Some(touch) = touches.first() {
            let (pressed, held, released) = match touch.phase {
                TouchPhase::Started => (true, true, false),
                TouchPhase::Moved | TouchPhase::Stationary => (false, true, false),
                TouchPhase::Ended | TouchPhase::Cancelled => (false, false, true),
            };
            return Self {
                x: touch.x,
                y: touch.y,
                pressed,
                held,
                released,
                source: PointerSource::Touch,
            };
        }

        Self {
            x: mouse.x,
            y: mouse.y,
            pressed: mouse.left_pressed,
            held: mouse.left_down || mouse.left_pressed,
            released: mouse.left_released,
            source: PointerSource::Mouse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_wins_over_mouse() {
        let mouse = MouseState { x: 1.0, y: 2.0, left_down: true, ..Default::default() };
        let touches = [TouchPoint { id: 7, phase: TouchPhase::Started, x: 50.0, y: 60.0 }];
        let sample = PointerSample::coalesce(&touches, &mouse);
        assert_eq!(sample.source, PointerSource::Touch);
        assert_eq!(sample.position(), (50.0, 60.0));
        assert!(sample.pressed && sample.held && !sample.released);
    }

    #[test]
    fn test_touch_phases_map_to_edges() {
        let mouse = MouseState::default();
        let at = |phase| [TouchPoint { id: 0, phase, x: 0.0, y: 0.0 }];

        let moved = PointerSample::coalesce(&at(TouchPhase::Moved), &mouse);
        assert!(!moved.pressed && moved.held && !moved.released);

        let ended = PointerSample::coalesce(&at(TouchPhase::Ended), &mouse);
        assert!(!ended.held && ended.released);

        let cancelled = PointerSample::coalesce(&at(TouchPhase::Cancelled), &mouse);
        assert!(cancelled.released);
    }

    #[test]
    fn test_mouse_fallback() {
        let mouse = MouseState {
            x: 10.0,
            y: 20.0,
            left_down: false,
            left_pressed: true,
            left_released: false,
        };
        let sample = PointerSample::coalesce(&[], &mouse);
        assert_eq!(sample.source, PointerSource::Mouse);
        assert!(sample.pressed);
        // Press edge implies held even if the down flag lags a frame
        assert!(sample.held);
    }
}
