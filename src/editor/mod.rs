//! Annotation Editor
//!
//! Layout:
//! - Ground view (bird's-eye, draw/move/pick boxes)
//! - Annotation list with attributes
//! - Top / front / side projection panels for edge resizing
//! - Kind confirmation popup after each draw

mod state;
mod layout;
mod bird_view;
mod tri_view;
mod attribute_panel;
mod type_popup;

pub use state::*;
pub use layout::*;
pub use bird_view::GroundView;
