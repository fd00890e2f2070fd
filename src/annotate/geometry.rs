//! Small value types shared by the annotation core
//!
//! World frame: X to the right, Y up, Z into the scene (depth).

use serde::{Deserialize, Serialize};

/// Smallest extent a box may have along any axis (meters)
pub const MIN_EXTENT: f64 = 0.01;

/// Largest extent a box may have along any axis (meters)
pub const MAX_EXTENT: f64 = 1_000.0;

/// Round to millimeter precision (3 decimal places)
pub fn round_mm(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// A point in world space (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component along a world axis
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Copy with one component replaced
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }

    pub fn rounded(&self) -> Self {
        Self::new(round_mm(self.x), round_mm(self.y), round_mm(self.z))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// World axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// The box dimension measured along this axis
    pub fn dimension(&self) -> Dimension {
        match self {
            Axis::X => Dimension::Width,
            Axis::Y => Dimension::Height,
            Axis::Z => Dimension::Length,
        }
    }
}

/// One of the three box extents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Length,
    Height,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Width, Dimension::Length, Dimension::Height];

    pub fn axis(&self) -> Axis {
        match self {
            Dimension::Width => Axis::X,
            Dimension::Height => Axis::Y,
            Dimension::Length => Axis::Z,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Width => "W",
            Dimension::Length => "L",
            Dimension::Height => "H",
        }
    }
}
