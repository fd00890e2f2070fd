//! Drag Tracker System for the box editor
//!
//! One gesture at a time. A gesture starts on pointer-down, may be updated on
//! pointer-move, and always commits on pointer-up (there is no cancel path).
//!
//! Key types:
//! - `DragManager`: owns the active drag and which annotation it writes to
//! - `ActiveDrag`: enum of all possible drag types
//! - Specific trackers: ResizeTracker, MoveTracker, GroundMoveTracker,
//!   PanTracker, DrawTracker

mod draw_tracker;
mod move_tracker;
mod pan_tracker;
mod resize_tracker;

pub use draw_tracker::DrawTracker;
pub use move_tracker::{GroundMoveTracker, MoveTracker};
pub use pan_tracker::PanTracker;
pub use resize_tracker::{resize_edge, ResizeTracker};

use super::cuboid::OrientedBox;
use super::projection::PanelView;

/// Pointer position handed to an active drag.
///
/// Panel gestures work in panel-local pixels, ground gestures in ground
/// world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pointer {
    Panel { x: f64, y: f64 },
    Ground { x: f64, z: f64 },
}

/// The type of active drag operation
#[derive(Debug, Clone, Default)]
pub enum ActiveDrag {
    /// No drag in progress
    #[default]
    None,
    /// Dragging one edge in a projection panel
    Resize(ResizeTracker),
    /// Moving the whole box inside a projection panel
    Move(MoveTracker),
    /// Panning a projection panel's view
    Pan { panel: PanelView, tracker: PanTracker },
    /// Drawing a new box on the ground plane
    Draw(DrawTracker),
    /// Moving the focused box across the ground plane
    GroundMove(GroundMoveTracker),
}

impl ActiveDrag {
    pub fn is_active(&self) -> bool {
        !matches!(self, ActiveDrag::None)
    }

    /// Projection panel that owns this drag, if it is a panel gesture
    pub fn panel(&self) -> Option<PanelView> {
        match self {
            ActiveDrag::Resize(t) => Some(t.bounds.view),
            ActiveDrag::Move(t) => Some(t.bounds.view),
            ActiveDrag::Pan { panel, .. } => Some(*panel),
            _ => None,
        }
    }

    pub fn is_ground(&self) -> bool {
        matches!(self, ActiveDrag::Draw(_) | ActiveDrag::GroundMove(_))
    }

    pub fn is_resize(&self) -> bool {
        matches!(self, ActiveDrag::Resize(_))
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, ActiveDrag::Draw(_))
    }
}

/// Manages the single in-flight drag
#[derive(Debug, Clone, Default)]
pub struct DragManager {
    pub active: ActiveDrag,
    /// Annotation the drag writes to (None for draw/pan)
    pub target: Option<String>,
    /// Box computed from the latest pointer but not yet committed (resize/draw)
    pub preview: Option<OrientedBox>,
}

impl DragManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_active()
    }

    /// Start a drag; refused if one is already in flight
    pub fn start(&mut self, drag: ActiveDrag, target: Option<String>) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.active = drag;
        self.target = target;
        self.preview = None;
        true
    }

    /// End the current drag, returning its state
    pub fn finish(&mut self) -> (ActiveDrag, Option<String>) {
        self.preview = None;
        (std::mem::take(&mut self.active), self.target.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_start_refused() {
        let mut dm = DragManager::new();
        assert!(dm.start(ActiveDrag::Draw(DrawTracker::new((0.0, 0.0), 1.5)), None));
        assert!(!dm.start(
            ActiveDrag::Pan { panel: PanelView::Top, tracker: PanTracker::new((0.0, 0.0), (0.0, 0.0)) },
            None,
        ));
        assert!(dm.active.is_draw());
    }

    #[test]
    fn test_finish_clears_state() {
        let mut dm = DragManager::new();
        dm.start(ActiveDrag::Draw(DrawTracker::new((0.0, 0.0), 1.5)), Some("T1".into()));
        let (drag, target) = dm.finish();
        assert!(drag.is_ground());
        assert_eq!(target.as_deref(), Some("T1"));
        assert!(!dm.is_dragging());
        assert!(dm.target.is_none());
    }
}
