//! Draw Drag Tracker
//!
//! Drag across the ground plane to create a new box: the drag extent gives
//! width (X) and length (Z), height comes from the configured default, and
//! the box rests on the ground.

use crate::annotate::cuboid::OrientedBox;

#[derive(Debug, Clone)]
pub struct DrawTracker {
    /// Ground point where the drag started (x, z)
    pub start: (f64, f64),
    /// Latest ground point under the pointer
    pub current: (f64, f64),
    pub default_height: f64,
}

impl DrawTracker {
    pub fn new(start: (f64, f64), default_height: f64) -> Self {
        Self {
            start,
            current: start,
            default_height,
        }
    }

    /// Box spanned between the start point and `end`
    pub fn box_to(&self, end: (f64, f64)) -> OrientedBox {
        let width = (end.0 - self.start.0).abs();
        let length = (end.1 - self.start.1).abs();
        OrientedBox::on_ground(
            width,
            length,
            self.default_height,
            (self.start.0 + end.0) * 0.5,
            (self.start.1 + end.1) * 0.5,
        )
    }

    /// Box spanned so far
    pub fn preview(&self) -> OrientedBox {
        self.box_to(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::geometry::{Point3, MIN_EXTENT};

    #[test]
    fn test_drag_extent_gives_footprint() {
        let t = DrawTracker::new((4.0, 1.0), 1.5);
        let b = t.box_to((2.2, 5.4));
        assert_eq!(b.width, 1.8);
        assert_eq!(b.length, 4.4);
        assert_eq!(b.height, 1.5);
        assert_eq!(b.center, Point3::new(3.1, 0.75, 3.2));
    }

    #[test]
    fn test_click_without_drag_gives_min_box() {
        let t = DrawTracker::new((1.0, 1.0), 1.5);
        let b = t.preview();
        assert_eq!(b.width, MIN_EXTENT);
        assert_eq!(b.length, MIN_EXTENT);
    }
}
