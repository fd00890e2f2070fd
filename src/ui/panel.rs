//! Panels and split layouts
//!
//! A `SplitPanel` shares a rect between two children across a draggable
//! divider. Titled panels and scissor clipping live here too.

use macroquad::prelude::*;
use super::theme::*;
use super::{Rect, UiContext};

/// Divider orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitDir {
    /// Children side by side
    Horizontal,
    /// Children stacked
    Vertical,
}

/// Smallest size either child can be dragged down to
const MIN_CHILD: f32 = 120.0;
const DIVIDER: f32 = 4.0;

pub struct SplitPanel {
    pub id: u64,
    pub dir: SplitDir,
    /// Share of the bounds given to the first child
    pub ratio: f32,
}

impl SplitPanel {
    pub fn new(id: u64, dir: SplitDir, ratio: f32) -> Self {
        Self { id, dir, ratio: ratio.clamp(0.0, 1.0) }
    }

    /// (origin, length) of the bounds along the split direction
    fn span(&self, bounds: &Rect) -> (f32, f32) {
        match self.dir {
            SplitDir::Horizontal => (bounds.x, bounds.w),
            SplitDir::Vertical => (bounds.y, bounds.h),
        }
    }

    fn divider(&self, bounds: &Rect) -> Rect {
        let (origin, len) = self.span(bounds);
        let at = origin + len * self.ratio - DIVIDER * 0.5;
        match self.dir {
            SplitDir::Horizontal => Rect::new(at, bounds.y, DIVIDER, bounds.h),
            SplitDir::Vertical => Rect::new(bounds.x, at, bounds.w, DIVIDER),
        }
    }

    /// Handle divider dragging, draw the divider and return both children.
    /// No divider drag starts while `locked`.
    pub fn update(&mut self, ctx: &mut UiContext, bounds: Rect, locked: bool) -> (Rect, Rect) {
        let mouse = ctx.background_mouse();
        let hovered = ctx.dragging.is_none() && mouse.inside(&self.divider(&bounds));
        if hovered && mouse.left_pressed && !locked {
            ctx.dragging = Some(self.id);
        }

        let dragging = ctx.is_dragging(self.id);
        let (origin, len) = self.span(&bounds);
        if dragging && len > 0.0 {
            let pos = match self.dir {
                SplitDir::Horizontal => ctx.mouse.x,
                SplitDir::Vertical => ctx.mouse.y,
            };
            let limit = (MIN_CHILD / len).min(0.5);
            self.ratio = ((pos - origin) / len).clamp(limit, 1.0 - limit);
        }

        let d = self.divider(&bounds);
        draw_rectangle(d.x, d.y, d.w, d.h, if hovered || dragging { ACCENT_COLOR } else { BORDER_COLOR });

        let gap = DIVIDER * 0.5;
        let cut = len * self.ratio;
        match self.dir {
            SplitDir::Horizontal => {
                let (first, rest) = bounds.cut_left(cut);
                (first.cut_right(gap).0, rest.cut_left(gap).1)
            }
            SplitDir::Vertical => {
                let (first, rest) = bounds.cut_top(cut);
                (first.cut_bottom(gap).0, rest.cut_top(gap).1)
            }
        }
    }
}

pub const PANEL_TITLE_HEIGHT: f32 = 20.0;

/// Panel background with border and an optional title bar
pub fn draw_panel(rect: Rect, title: Option<&str>, bg_color: Color) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, bg_color);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, BORDER_COLOR);
    if let Some(title) = title {
        draw_rectangle(rect.x, rect.y, rect.w, PANEL_TITLE_HEIGHT, HEADER_COLOR);
        draw_text(title, rect.x + 6.0, rect.y + 14.0, FONT_SIZE_HEADER, TEXT_COLOR);
    }
}

/// Area left for content once the title bar is taken
pub fn panel_content_rect(rect: Rect, has_title: bool) -> Rect {
    let body = if has_title { rect.cut_top(PANEL_TITLE_HEIGHT).1 } else { rect };
    body.inset(2.0)
}

/// Clip subsequent drawing to `rect` until `end_clip`
pub fn begin_clip(rect: Rect) {
    let dpi = screen_dpi_scale();
    gl_use_default_material();
    let scissor = (
        (rect.x * dpi) as i32,
        (rect.y * dpi) as i32,
        (rect.w * dpi) as i32,
        (rect.h * dpi) as i32,
    );
    unsafe {
        get_internal_gl().quad_gl.scissor(Some(scissor));
    }
}

pub fn end_clip() {
    unsafe {
        get_internal_gl().quad_gl.scissor(None);
    }
}
