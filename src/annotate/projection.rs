//! Projection panels
//!
//! Each panel shows the focused box along one world axis pair:
//! - Top:   (X, Z) showing width x length
//! - Front: (X, Y) showing width x height
//! - Side:  (Z, Y) showing length x height
//!
//! The visible world range is the box plus a fixed margin on every side,
//! stretched onto the padded canvas, then zoomed and panned:
//!
//! ```text
//! pixel = pad + ((v - min) / span) * (canvas - 2 * pad) * scale + pan
//! ```
//!
//! `PanelBounds` is a snapshot of everything that mapping depends on. A drag
//! captures one at its start and keeps using it until pointer-up, so the
//! inverse mapping stays consistent even as the box changes underneath.

use super::cuboid::OrientedBox;
use super::geometry::{round_mm, Axis, Dimension, Point3};

/// World margin added around the box on every side (meters)
pub const VIEW_MARGIN: f64 = 0.05;
/// Zoom limits for projection panels
pub const MIN_ZOOM: f64 = 0.2;
pub const MAX_ZOOM: f64 = 4.0;

/// Which projection a panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelView {
    Top,
    Front,
    Side,
}

impl PanelView {
    pub const ALL: [PanelView; 3] = [PanelView::Top, PanelView::Front, PanelView::Side];

    /// (horizontal, vertical) world axes
    pub fn axes(&self) -> (Axis, Axis) {
        match self {
            PanelView::Top => (Axis::X, Axis::Z),
            PanelView::Front => (Axis::X, Axis::Y),
            PanelView::Side => (Axis::Z, Axis::Y),
        }
    }

    /// (horizontal, vertical) box dimensions
    pub fn dimensions(&self) -> (Dimension, Dimension) {
        let (a, b) = self.axes();
        (a.dimension(), b.dimension())
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelView::Top => "Top XZ",
            PanelView::Front => "Front XY",
            PanelView::Side => "Side ZY",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            PanelView::Top => 0,
            PanelView::Front => 1,
            PanelView::Side => 2,
        }
    }
}

/// User-controlled zoom and pan for one panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Zoom factor, always within [MIN_ZOOM, MAX_ZOOM]
    scale: f64,
    /// Pixel offset (unclamped)
    pub pan: (f64, f64),
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { scale: 1.0, pan: (0.0, 0.0) }
    }
}

impl ViewTransform {
    pub fn new(scale: f64, pan: (f64, f64)) -> Self {
        let mut t = Self { scale: 1.0, pan };
        t.set_scale(scale);
        t
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        // NaN falls back to the lower limit via f64::max
        self.scale = scale.max(MIN_ZOOM).min(MAX_ZOOM);
    }

    /// Apply one wheel notch: scrolling up zooms in by 10%, down zooms out by 10%
    pub fn zoom_notch(&mut self, scroll: f64) {
        if scroll == 0.0 {
            return;
        }
        let step = if scroll < 0.0 { 0.9 } else { 1.1 };
        self.set_scale(round_mm(self.scale * step));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A box edge as seen in a panel. Panel Y grows downward, so `Top` is the
/// minimum of the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Whether this edge moves along the panel's horizontal axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    /// Whether this edge is the minimum side of its axis
    pub fn is_min(&self) -> bool {
        matches!(self, Edge::Left | Edge::Top)
    }
}

/// Result of hit-testing the pointer against the box rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit {
    Edge(Edge),
    Inside,
    Outside,
}

/// Box rectangle in panel-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PixelRect {
    /// Classify a pixel against this rectangle. Edges take priority over the
    /// interior, in the order left, right, top, bottom.
    pub fn hit_test(&self, x: f64, y: f64, near: f64) -> PanelHit {
        let within_y = y >= self.y0 - near && y <= self.y1 + near;
        let within_x = x >= self.x0 - near && x <= self.x1 + near;

        if (x - self.x0).abs() <= near && within_y {
            PanelHit::Edge(Edge::Left)
        } else if (x - self.x1).abs() <= near && within_y {
            PanelHit::Edge(Edge::Right)
        } else if (y - self.y0).abs() <= near && within_x {
            PanelHit::Edge(Edge::Top)
        } else if (y - self.y1).abs() <= near && within_x {
            PanelHit::Edge(Edge::Bottom)
        } else if x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1 {
            PanelHit::Inside
        } else {
            PanelHit::Outside
        }
    }
}

/// One axis of the panel mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapping {
    pub min: f64,
    pub max: f64,
    /// Canvas size along this axis (pixels)
    pub canvas: f64,
    pub pad: f64,
    pub scale: f64,
    pub pan: f64,
}

impl AxisMapping {
    /// World span, guarded against zero
    fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 { 1.0 } else { span }
    }

    /// Usable pixel extent after padding, guarded against zero or negative
    fn usable(&self) -> f64 {
        let usable = self.canvas - self.pad * 2.0;
        if usable > 0.0 { usable } else { 1.0 }
    }

    pub fn to_pixel(&self, v: f64) -> f64 {
        let normalized = (v - self.min) / self.span() * self.usable();
        self.pad + normalized * self.scale + self.pan
    }

    pub fn to_world(&self, px: f64) -> f64 {
        let t = (px - self.pad - self.pan) / self.usable() / self.scale;
        self.min + t * self.span()
    }

    /// World distance covered by a pixel delta
    pub fn delta_to_world(&self, d_px: f64) -> f64 {
        d_px / self.usable() / self.scale * self.span()
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Frozen mapping for one panel: bounds, canvas, zoom and pan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelBounds {
    pub view: PanelView,
    pub a: AxisMapping,
    pub b: AxisMapping,
}

impl PanelBounds {
    /// Capture the mapping for a box as it is right now
    pub fn capture(
        view: PanelView,
        cuboid: &OrientedBox,
        canvas: (f64, f64),
        pad: f64,
        transform: &ViewTransform,
    ) -> Self {
        let (axis_a, axis_b) = view.axes();
        let axis = |axis: Axis, canvas: f64, pan: f64| {
            let (lo, hi) = cuboid.edges(axis);
            AxisMapping {
                min: lo - VIEW_MARGIN,
                max: hi + VIEW_MARGIN,
                canvas,
                pad,
                scale: transform.scale(),
                pan,
            }
        };
        Self {
            view,
            a: axis(axis_a, canvas.0, transform.pan.0),
            b: axis(axis_b, canvas.1, transform.pan.1),
        }
    }

    /// Mapping for the axis an edge moves along
    pub fn mapping_for(&self, edge: Edge) -> &AxisMapping {
        if edge.is_horizontal() { &self.a } else { &self.b }
    }

    /// World point projected to panel pixels
    pub fn to_pixel(&self, p: &Point3) -> (f64, f64) {
        let (axis_a, axis_b) = self.view.axes();
        (self.a.to_pixel(p.get(axis_a)), self.b.to_pixel(p.get(axis_b)))
    }

    /// Panel pixel back to the two panel-axis world coordinates
    pub fn to_world(&self, px: (f64, f64)) -> (f64, f64) {
        (self.a.to_world(px.0), self.b.to_world(px.1))
    }

    /// The box's own rectangle in panel pixels
    pub fn box_rect(&self, cuboid: &OrientedBox) -> PixelRect {
        let (axis_a, axis_b) = self.view.axes();
        let (a0, a1) = cuboid.edges(axis_a);
        let (b0, b1) = cuboid.edges(axis_b);
        PixelRect {
            x0: self.a.to_pixel(a0),
            y0: self.b.to_pixel(b0),
            x1: self.a.to_pixel(a1),
            y1: self.b.to_pixel(b1),
        }
    }

    /// Whether a world point's panel coordinates fall inside the extended view range
    pub fn contains(&self, p: &Point3) -> bool {
        let (axis_a, axis_b) = self.view.axes();
        self.a.contains(p.get(axis_a)) && self.b.contains(p.get(axis_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bounds(transform: ViewTransform) -> PanelBounds {
        let b = OrientedBox::new(1.8, 4.4, 1.5, Point3::new(2.0, 0.75, -1.0));
        PanelBounds::capture(PanelView::Top, &b, (260.0, 160.0), 12.0, &transform)
    }

    #[test]
    fn test_panel_axes() {
        assert_eq!(PanelView::Top.dimensions(), (Dimension::Width, Dimension::Length));
        assert_eq!(PanelView::Front.dimensions(), (Dimension::Width, Dimension::Height));
        assert_eq!(PanelView::Side.dimensions(), (Dimension::Length, Dimension::Height));
    }

    #[test]
    fn test_forward_maps_bounds_to_padded_canvas() {
        let bounds = sample_bounds(ViewTransform::default());
        assert!((bounds.a.to_pixel(bounds.a.min) - 12.0).abs() < 1e-9);
        assert!((bounds.a.to_pixel(bounds.a.max) - 248.0).abs() < 1e-9);
        assert!((bounds.b.to_pixel(bounds.b.max) - 148.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_with_zoom_and_pan() {
        for transform in [
            ViewTransform::default(),
            ViewTransform::new(0.2, (-40.0, 13.5)),
            ViewTransform::new(3.7, (120.0, -300.0)),
        ] {
            let bounds = sample_bounds(transform);
            let mut px = 12.0;
            while px <= 248.0 {
                let back = bounds.a.to_pixel(bounds.a.to_world(px));
                assert!((back - px).abs() < 1e-6, "px {} -> {}", px, back);
                px += 3.7;
            }
            let mut py = 12.0;
            while py <= 148.0 {
                let back = bounds.b.to_pixel(bounds.b.to_world(py));
                assert!((back - py).abs() < 1e-6);
                py += 2.9;
            }
        }
    }

    #[test]
    fn test_zero_span_uses_unit_denominator() {
        let axis = AxisMapping { min: 2.0, max: 2.0, canvas: 100.0, pad: 10.0, scale: 1.0, pan: 0.0 };
        let px = axis.to_pixel(2.5);
        assert!(px.is_finite());
        assert!((axis.to_world(px) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut t = ViewTransform::default();
        for _ in 0..60 {
            t.zoom_notch(1.0);
        }
        assert_eq!(t.scale(), MAX_ZOOM);
        for _ in 0..60 {
            t.zoom_notch(-1.0);
        }
        assert_eq!(t.scale(), MIN_ZOOM);
        t.set_scale(f64::NAN);
        assert_eq!(t.scale(), MIN_ZOOM);
    }

    #[test]
    fn test_zoom_notch_rounds() {
        let mut t = ViewTransform::default();
        t.zoom_notch(1.0);
        t.zoom_notch(1.0);
        assert_eq!(t.scale(), 1.21);
        t.zoom_notch(0.0);
        assert_eq!(t.scale(), 1.21);
    }

    #[test]
    fn test_hit_test_priority() {
        let rect = PixelRect { x0: 50.0, y0: 40.0, x1: 150.0, y1: 120.0 };
        assert_eq!(rect.hit_test(52.0, 80.0, 6.0), PanelHit::Edge(Edge::Left));
        assert_eq!(rect.hit_test(147.0, 80.0, 6.0), PanelHit::Edge(Edge::Right));
        assert_eq!(rect.hit_test(100.0, 35.0, 6.0), PanelHit::Edge(Edge::Top));
        assert_eq!(rect.hit_test(100.0, 125.0, 6.0), PanelHit::Edge(Edge::Bottom));
        // Corner: left wins over top
        assert_eq!(rect.hit_test(51.0, 41.0, 6.0), PanelHit::Edge(Edge::Left));
        assert_eq!(rect.hit_test(100.0, 80.0, 6.0), PanelHit::Inside);
        assert_eq!(rect.hit_test(10.0, 80.0, 6.0), PanelHit::Outside);
        assert_eq!(rect.hit_test(52.0, 130.0, 6.0), PanelHit::Outside);
    }

    #[test]
    fn test_box_rect_sits_inside_margin() {
        let b = OrientedBox::default();
        let bounds = PanelBounds::capture(PanelView::Front, &b, (260.0, 160.0), 12.0, &ViewTransform::default());
        let rect = bounds.box_rect(&b);
        assert!(rect.x0 > 12.0 && rect.x1 < 248.0);
        assert!(rect.y0 > 12.0 && rect.y1 < 148.0);
        assert!(bounds.contains(&Point3::new(0.52, 1.04, 100.0)));
        assert!(!bounds.contains(&Point3::new(0.6, 0.5, 0.0)));
    }
}
