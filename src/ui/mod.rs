//! Immediate-mode UI helpers for the annotation editor
//!
//! - Rectangle-based layout with resizable splits
//! - Flat buttons, toolbars and numeric steppers
//! - Macroquad integration for rendering

mod rect;
mod panel;
mod widgets;
mod input;
mod theme;

pub use rect::*;
pub use panel::*;
pub use widgets::*;
pub use input::*;
pub use theme::*;
