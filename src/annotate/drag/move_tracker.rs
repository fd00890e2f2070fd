//! Move Drag Trackers
//!
//! Two flavours:
//! - `MoveTracker`: drags the whole box inside a projection panel, along
//!   both panel axes, clamped so it stays within the captured view range.
//! - `GroundMoveTracker`: drags the box footprint across the ground plane
//!   in the bird's-eye view (X/Z only, height untouched).

use crate::annotate::cuboid::{BoxPatch, OrientedBox};
use crate::annotate::projection::PanelBounds;

/// Clamp without panicking when `lo > hi` (returns the midpoint instead)
fn clamp_range(v: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        v.max(lo).min(hi)
    }
}

/// Tracks a whole-box move in a projection panel
#[derive(Debug, Clone)]
pub struct MoveTracker {
    pub bounds: PanelBounds,
    pub start_box: OrientedBox,
    /// Pointer position at drag start (panel pixels)
    pub start_px: (f64, f64),
}

impl MoveTracker {
    pub fn new(bounds: PanelBounds, start_box: OrientedBox, start_px: (f64, f64)) -> Self {
        Self { bounds, start_box, start_px }
    }

    /// Box moved by the pointer delta since drag start
    pub fn moved_to(&self, px: (f64, f64)) -> OrientedBox {
        let (axis_a, axis_b) = self.bounds.view.axes();
        let wa = self.bounds.a.delta_to_world(px.0 - self.start_px.0);
        let wb = self.bounds.b.delta_to_world(px.1 - self.start_px.1);

        let half_a = self.start_box.extent_along(axis_a) * 0.5;
        let half_b = self.start_box.extent_along(axis_b) * 0.5;
        let next_a = clamp_range(
            self.start_box.center.get(axis_a) + wa,
            self.bounds.a.min + half_a,
            self.bounds.a.max - half_a,
        );
        let next_b = clamp_range(
            self.start_box.center.get(axis_b) + wb,
            self.bounds.b.min + half_b,
            self.bounds.b.max - half_b,
        );

        let center = self.start_box.center.with(axis_a, next_a).with(axis_b, next_b);
        let mut next = self.start_box;
        next.set_box(BoxPatch::new(), Some(center));
        next
    }
}

/// Tracks a footprint move on the ground plane
#[derive(Debug, Clone)]
pub struct GroundMoveTracker {
    pub start_box: OrientedBox,
    /// Ground point under the pointer at drag start (x, z)
    pub start_ground: (f64, f64),
}

impl GroundMoveTracker {
    pub fn new(start_box: OrientedBox, start_ground: (f64, f64)) -> Self {
        Self { start_box, start_ground }
    }

    pub fn moved_to(&self, ground: (f64, f64)) -> OrientedBox {
        let mut center = self.start_box.center;
        center.x += ground.0 - self.start_ground.0;
        center.z += ground.1 - self.start_ground.1;
        let mut next = self.start_box;
        next.set_box(BoxPatch::new(), Some(center));
        next
    }
}
