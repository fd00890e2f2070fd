//! Oriented Box
//!
//! A cuboid that is axis-aligned in its own object space, described by its
//! extents and world-space centroid. This is the single value every panel
//! reads and writes.

use serde::{Deserialize, Serialize};
use super::geometry::{round_mm, Axis, Dimension, Point3, MAX_EXTENT, MIN_EXTENT};

/// Clamp an extent into `[MIN_EXTENT, MAX_EXTENT]` at millimeter precision.
/// NaN collapses to the minimum, infinities to the nearer limit.
fn sanitize_extent(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_EXTENT;
    }
    round_mm(value.clamp(MIN_EXTENT, MAX_EXTENT))
}

/// Cuboid with width (X), height (Y) and length (Z) extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub center: Point3,
}

impl Default for OrientedBox {
    fn default() -> Self {
        Self {
            width: 1.0,
            length: 1.0,
            height: 1.0,
            center: Point3::new(0.0, 0.5, 0.0),
        }
    }
}

/// Partial dimension update; absent fields keep their current value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxPatch {
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub height: Option<f64>,
}

impl BoxPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that changes a single dimension
    pub fn single(dim: Dimension, value: f64) -> Self {
        Self::new().with(dim, value)
    }

    pub fn with(mut self, dim: Dimension, value: f64) -> Self {
        match dim {
            Dimension::Width => self.width = Some(value),
            Dimension::Length => self.length = Some(value),
            Dimension::Height => self.height = Some(value),
        }
        self
    }
}

impl OrientedBox {
    /// Build a box, applying the size clamp and mm rounding
    pub fn new(width: f64, length: f64, height: f64, center: Point3) -> Self {
        Self {
            width: sanitize_extent(width),
            length: sanitize_extent(length),
            height: sanitize_extent(height),
            center: center.rounded(),
        }
    }

    /// Box resting on the ground plane (`y = 0`) under the given footprint center
    pub fn on_ground(width: f64, length: f64, height: f64, x: f64, z: f64) -> Self {
        let height = sanitize_extent(height);
        Self::new(width, length, height, Point3::new(x, height * 0.5, z))
    }

    /// Extent measured along a dimension
    pub fn extent(&self, dim: Dimension) -> f64 {
        match dim {
            Dimension::Width => self.width,
            Dimension::Length => self.length,
            Dimension::Height => self.height,
        }
    }

    /// Extent measured along a world axis
    pub fn extent_along(&self, axis: Axis) -> f64 {
        self.extent(axis.dimension())
    }

    /// (min, max) edge positions along a world axis
    pub fn edges(&self, axis: Axis) -> (f64, f64) {
        let half = self.extent_along(axis) * 0.5;
        let c = self.center.get(axis);
        (c - half, c + half)
    }

    /// Merge a dimension patch, optionally replacing the whole center.
    ///
    /// Every committed value is clamped and rounded here, so reapplying the
    /// same arguments leaves the box unchanged.
    pub fn set_box(&mut self, patch: BoxPatch, new_center: Option<Point3>) {
        if let Some(w) = patch.width {
            self.width = sanitize_extent(w);
        }
        if let Some(l) = patch.length {
            self.length = sanitize_extent(l);
        }
        if let Some(h) = patch.height {
            self.height = sanitize_extent(h);
        }
        if let Some(c) = new_center {
            if c.is_finite() {
                self.center = c.rounded();
            }
        }
    }

    /// Check whether a point lies within the box footprint on the ground (X-Z)
    pub fn footprint_contains(&self, x: f64, z: f64) -> bool {
        let (x0, x1) = self.edges(Axis::X);
        let (z0, z1) = self.edges(Axis::Z);
        x >= x0 && x <= x1 && z >= z0 && z <= z1
    }

    pub fn volume(&self) -> f64 {
        self.width * self.length * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_min_invariant(b: &OrientedBox) {
        assert!(b.width >= MIN_EXTENT, "width {}", b.width);
        assert!(b.length >= MIN_EXTENT, "length {}", b.length);
        assert!(b.height >= MIN_EXTENT, "height {}", b.height);
    }

    #[test]
    fn test_set_box_clamps_bad_extents() {
        let requests = [-5.0, -0.001, 0.0, 0.004, f64::NAN, f64::NEG_INFINITY, 1e-9];
        for &w in &requests {
            for &h in &requests {
                let mut b = OrientedBox::default();
                b.set_box(BoxPatch::new().with(Dimension::Width, w).with(Dimension::Height, h), None);
                assert_min_invariant(&b);
                assert_eq!(b.length, 1.0);
            }
        }
    }

    #[test]
    fn test_set_box_clamps_huge_extents() {
        let mut b = OrientedBox::default();
        b.set_box(BoxPatch::new().with(Dimension::Width, f64::INFINITY).with(Dimension::Length, 5e6), None);
        assert_eq!(b.width, MAX_EXTENT);
        assert_eq!(b.length, MAX_EXTENT);
        assert_eq!(OrientedBox::new(f64::INFINITY, 1.0, 1.0, Point3::default()).width, MAX_EXTENT);
    }

    #[test]
    fn test_set_box_pseudo_random_inputs() {
        // Deterministic LCG sweep over a wide range, including negatives
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 11) as f64 / (1u64 << 53) as f64) * 40.0 - 20.0
        };
        let mut b = OrientedBox::default();
        for _ in 0..2000 {
            let patch = BoxPatch::new()
                .with(Dimension::Width, next())
                .with(Dimension::Length, next())
                .with(Dimension::Height, next());
            b.set_box(patch, Some(Point3::new(next(), next(), next())));
            assert_min_invariant(&b);
        }
    }

    #[test]
    fn test_set_box_preserves_center_without_override() {
        let mut b = OrientedBox::new(2.0, 3.0, 1.5, Point3::new(1.0, 0.75, -2.0));
        b.set_box(BoxPatch::single(Dimension::Length, 5.0), None);
        assert_eq!(b.center, Point3::new(1.0, 0.75, -2.0));
        assert_eq!(b.length, 5.0);
        assert_eq!(b.width, 2.0);
    }

    #[test]
    fn test_set_box_replaces_full_center() {
        let mut b = OrientedBox::default();
        b.set_box(BoxPatch::new(), Some(Point3::new(3.0, 4.0, 5.0)));
        assert_eq!(b.center, Point3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_set_box_idempotent() {
        let patch = BoxPatch::new().with(Dimension::Width, 2.34567).with(Dimension::Height, 0.0);
        let center = Some(Point3::new(1.23456, -0.5, 7.0001));

        let mut once = OrientedBox::default();
        once.set_box(patch, center);
        let mut twice = once;
        twice.set_box(patch, center);

        assert_eq!(once, twice);
        assert_eq!(once.width, 2.346);
        assert_eq!(once.center.x, 1.235);
    }

    #[test]
    fn test_on_ground_rests_on_floor() {
        let b = OrientedBox::on_ground(1.8, 4.4, 1.5, 2.0, -3.0);
        assert_eq!(b.center.y, 0.75);
        let (y0, _) = b.edges(Axis::Y);
        assert!(y0.abs() < 1e-9);
    }

    #[test]
    fn test_footprint_contains() {
        let b = OrientedBox::new(2.0, 4.0, 1.0, Point3::new(0.0, 0.5, 0.0));
        assert!(b.footprint_contains(0.9, 1.9));
        assert!(!b.footprint_contains(1.1, 0.0));
        assert!(!b.footprint_contains(0.0, -2.1));
    }
}
