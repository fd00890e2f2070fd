//! Point clouds
//!
//! Loaded once per session and only read afterwards. Panels draw the subset
//! of points that falls inside their view range, with the points inside the
//! focused box highlighted.

mod import;

pub use import::*;

use crate::annotate::{OrientedBox, PanelBounds, Point3};

/// Hard cap on points accepted from one file
pub const MAX_POINTS: usize = 5_000_000;

/// Axis-aligned bounds of a cloud
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3,
    pub max: Point3,
}

impl Bounds {
    pub fn of_point(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    pub fn include(&mut self, p: Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    pub fn size(&self) -> Point3 {
        Point3::new(self.max.x - self.min.x, self.max.y - self.min.y, self.max.z - self.min.z)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub points: Vec<Point3>,
    /// None for an empty cloud
    pub bounds: Option<Bounds>,
}

impl PointCloud {
    /// Build a cloud, dropping points with non-finite coordinates
    pub fn from_points(points: Vec<Point3>) -> Self {
        let points: Vec<Point3> = points.into_iter().filter(Point3::is_finite).collect();
        let bounds = Self::compute_bounds(&points);
        Self { points, bounds }
    }

    fn compute_bounds(points: &[Point3]) -> Option<Bounds> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Bounds::of_point(*first);
        for p in rest {
            bounds.include(*p);
        }
        Some(bounds)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Roll sensor Z-up data into the Y-up editor frame: (x, y, z) -> (x, z, -y)
    pub fn roll_z_up(&mut self) {
        for p in &mut self.points {
            *p = Point3::new(p.x, p.z, -p.y);
        }
        self.bounds = Self::compute_bounds(&self.points);
    }
}

/// Panel-pixel positions of the points visible in one panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelPoints {
    /// Inside the panel's view range but outside the box rectangle
    pub outer: Vec<(f64, f64)>,
    /// Inside the box rectangle
    pub inner: Vec<(f64, f64)>,
}

/// Split points into the panel's outer and inner sets.
///
/// Only the panel's two axes are tested. When there are more than
/// `max_points` points, an even stride sample is taken first.
pub fn partition_for_panel(
    bounds: &PanelBounds,
    cuboid: &OrientedBox,
    points: &[Point3],
    max_points: usize,
) -> PanelPoints {
    let mut out = PanelPoints::default();
    if max_points == 0 {
        return out;
    }
    let step = points.len().div_ceil(max_points).max(1);
    let (axis_a, axis_b) = bounds.view.axes();
    let (a0, a1) = cuboid.edges(axis_a);
    let (b0, b1) = cuboid.edges(axis_b);

    for p in points.iter().step_by(step) {
        if !bounds.contains(p) {
            continue;
        }
        let (va, vb) = (p.get(axis_a), p.get(axis_b));
        let px = bounds.to_pixel(p);
        if va >= a0 && va <= a1 && vb >= b0 && vb <= b1 {
            out.inner.push(px);
        } else {
            out.outer.push(px);
        }
    }
    out
}

/// Count the cloud points inside a box (all three axes)
pub fn points_in_box(cuboid: &OrientedBox, points: &[Point3]) -> usize {
    let (x0, x1) = cuboid.edges(crate::annotate::Axis::X);
    let (y0, y1) = cuboid.edges(crate::annotate::Axis::Y);
    let (z0, z1) = cuboid.edges(crate::annotate::Axis::Z);
    points
        .iter()
        .filter(|p| p.x >= x0 && p.x <= x1 && p.y >= y0 && p.y <= y1 && p.z >= z0 && p.z <= z1)
        .count()
}
