//! Pan Drag Tracker
//!
//! Right-drag in a projection panel shifts its view. Never touches the box.

#[derive(Debug, Clone)]
pub struct PanTracker {
    pub start_px: (f64, f64),
    pub start_pan: (f64, f64),
}

impl PanTracker {
    pub fn new(start_px: (f64, f64), start_pan: (f64, f64)) -> Self {
        Self { start_px, start_pan }
    }

    /// Pan offset for the current pointer position
    pub fn pan_at(&self, px: (f64, f64)) -> (f64, f64) {
        (
            self.start_pan.0 + (px.0 - self.start_px.0),
            self.start_pan.1 + (px.1 - self.start_px.1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_accumulates_from_start() {
        let t = PanTracker::new((100.0, 50.0), (10.0, -4.0));
        assert_eq!(t.pan_at((100.0, 50.0)), (10.0, -4.0));
        assert_eq!(t.pan_at((130.0, 20.0)), (40.0, -34.0));
    }
}
