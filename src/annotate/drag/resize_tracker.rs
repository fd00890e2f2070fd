//! Edge Resize Tracker
//!
//! Drags one face of the box while the opposite face stays put, changing the
//! extent and the center along that axis together.

use crate::annotate::cuboid::{BoxPatch, OrientedBox};
use crate::annotate::geometry::{Axis, MIN_EXTENT};
use crate::annotate::projection::{Edge, PanelBounds};

/// Move one edge of `cuboid` along `axis` to world coordinate `world`.
///
/// `moves_min` selects the minimum edge (left/top) or the maximum edge
/// (right/bottom). The dragged edge cannot come closer than `MIN_EXTENT` to
/// the opposite one.
pub fn resize_edge(cuboid: &OrientedBox, axis: Axis, moves_min: bool, world: f64) -> OrientedBox {
    let (mut min_edge, mut max_edge) = cuboid.edges(axis);
    if moves_min {
        min_edge = world.min(max_edge - MIN_EXTENT);
    } else {
        max_edge = world.max(min_edge + MIN_EXTENT);
    }

    let extent = (max_edge - min_edge).max(MIN_EXTENT);
    let center = cuboid.center.with(axis, (min_edge + max_edge) * 0.5);

    let mut next = *cuboid;
    next.set_box(BoxPatch::single(axis.dimension(), extent), Some(center));
    next
}

/// Tracks an edge-resize drag in a projection panel
#[derive(Debug, Clone)]
pub struct ResizeTracker {
    pub edge: Edge,
    /// Mapping captured at drag start
    pub bounds: PanelBounds,
    /// Box as it was when the drag started
    pub start_box: OrientedBox,
}

impl ResizeTracker {
    pub fn new(edge: Edge, bounds: PanelBounds, start_box: OrientedBox) -> Self {
        Self { edge, bounds, start_box }
    }

    /// World axis the dragged edge moves along
    pub fn axis(&self) -> Axis {
        let (a, b) = self.bounds.view.axes();
        if self.edge.is_horizontal() { a } else { b }
    }

    /// Box with the dragged edge at a world coordinate
    pub fn resize_to(&self, world: f64) -> OrientedBox {
        resize_edge(&self.start_box, self.axis(), self.edge.is_min(), world)
    }

    /// Box with the dragged edge under a panel pixel
    pub fn resize_at_pixel(&self, px: (f64, f64)) -> OrientedBox {
        let mapping = self.bounds.mapping_for(self.edge);
        let coord = if self.edge.is_horizontal() { px.0 } else { px.1 };
        self.resize_to(mapping.to_world(coord))
    }
}
