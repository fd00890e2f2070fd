//! Screen rectangles and the cuts used to lay out the editor

/// Axis-aligned screen rectangle in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Half-open containment: the right and bottom borders belong to the neighbour
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.x..self.right()).contains(&x) && (self.y..self.bottom()).contains(&y)
    }

    /// Point relative to the top-left corner
    pub fn local(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.x, y - self.y)
    }

    pub fn inset(&self, by: f32) -> Self {
        Self::new(self.x + by, self.y + by, (self.w - 2.0 * by).max(0.0), (self.h - 2.0 * by).max(0.0))
    }

    /// Strip of height `h` off the top: (strip, rest)
    pub fn cut_top(&self, h: f32) -> (Self, Self) {
        let h = h.clamp(0.0, self.h);
        (Self { h, ..*self }, Self { y: self.y + h, h: self.h - h, ..*self })
    }

    /// Strip of height `h` off the bottom: (rest, strip)
    pub fn cut_bottom(&self, h: f32) -> (Self, Self) {
        self.cut_top(self.h - h.clamp(0.0, self.h))
    }

    /// Strip of width `w` off the left: (strip, rest)
    pub fn cut_left(&self, w: f32) -> (Self, Self) {
        let w = w.clamp(0.0, self.w);
        (Self { w, ..*self }, Self { x: self.x + w, w: self.w - w, ..*self })
    }

    /// Strip of width `w` off the right: (rest, strip)
    pub fn cut_right(&self, w: f32) -> (Self, Self) {
        self.cut_left(self.w - w.clamp(0.0, self.w))
    }

    /// `n` equal columns separated by `gap` pixels
    pub fn columns(&self, n: usize, gap: f32) -> Vec<Self> {
        if n == 0 {
            return Vec::new();
        }
        let w = ((self.w - gap * (n - 1) as f32) / n as f32).max(0.0);
        (0..n)
            .map(|i| Self { x: self.x + i as f32 * (w + gap), w, ..*self })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_bottom_keeps_strip_height() {
        let (rest, strip) = Rect::new(0.0, 10.0, 200.0, 100.0).cut_bottom(22.0);
        assert!((strip.h - 22.0).abs() < 0.001);
        assert!((strip.y - 88.0).abs() < 0.001);
        assert!((rest.h - 78.0).abs() < 0.001);
        // Oversized cuts take the whole rect
        let (rest, strip) = Rect::new(0.0, 0.0, 10.0, 10.0).cut_bottom(50.0);
        assert_eq!(rest.h, 0.0);
        assert_eq!(strip.h, 10.0);
    }

    #[test]
    fn test_cut_left_and_right() {
        let r = Rect::new(5.0, 0.0, 100.0, 20.0);
        let (left, rest) = r.cut_left(20.0);
        let (mid, right) = rest.cut_right(20.0);
        assert!((left.w - 20.0).abs() < 0.001);
        assert!((mid.x - 25.0).abs() < 0.001 && (mid.w - 60.0).abs() < 0.001);
        assert!((right.x - 85.0).abs() < 0.001);
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(10.0, 20.0));
        assert!(!r.contains(110.0, 40.0));
        assert!(!r.contains(50.0, 70.0));
    }

    #[test]
    fn test_columns() {
        let cols = Rect::new(10.0, 0.0, 320.0, 40.0).columns(3, 10.0);
        assert_eq!(cols.len(), 3);
        assert!((cols[0].w - 100.0).abs() < 0.001);
        assert!((cols[2].x - 230.0).abs() < 0.001);
        assert!(Rect::default().columns(0, 4.0).is_empty());
    }
}
