//! Sandbox cursors: drag-handle widgets for a 3D build mode
//!
//! Cursors let the player place and shape things with a pointer:
//! - control points (free, ground-bound, or height-only) for procedural
//!   shapes like terrain corners and wall ends
//! - an object cursor to move, lift, spin, delete or confirm a placed prop
//!
//! Everything runs once per frame on the main thread. The host feeds a
//! `PointerSample` and a `Scene` into `Cursor::update` and drains the
//! returned `CursorEvent`s.

pub mod config;
pub mod cursor;
pub mod geometry;
pub mod input;
pub mod scene;

pub use config::{ConfigError, CursorConfig};
pub use cursor::{Cursor, CursorEvent, CursorKind, CursorKindTag, DragMode, Orientation};
pub use geometry::{Camera, Vec3};
pub use input::PointerSample;
pub use scene::{EntityId, MemoryScene, Scene, Transform};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
