//! Cuboid annotation core
//!
//! Pure geometry and editing state, independent of rendering:
//! - Box model with mm rounding and minimum-extent clamping
//! - Per-panel projection math (forward/inverse, zoom/pan, hit tests)
//! - Drag trackers for resize, move, pan and draw
//! - Heuristic kind suggestion for freshly drawn boxes
//! - `EditorSession`, the single write path into the annotation set

mod geometry;
mod cuboid;
mod annotation;
mod classify;
mod projection;
pub mod drag;
mod session;

pub use geometry::*;
pub use cuboid::*;
pub use annotation::*;
pub use classify::*;
pub use projection::*;
pub use session::*;
pub use drag::{ActiveDrag, Pointer};
