//! Pointer input for cursors
//!
//! `pointer` holds the device-independent sample type; `state` fills it
//! from macroquad's mouse and touch APIs.

mod pointer;
mod state;

pub use pointer::*;
pub use state::{mouse_state, sample_pointer, touch_points};
