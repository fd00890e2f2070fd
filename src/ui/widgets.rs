//! Basic UI widgets

use macroquad::prelude::*;
use super::theme::*;
use super::{Rect, UiContext};

/// Left-to-right toolbar layout helper
pub struct Toolbar {
    rect: Rect,
    cursor_x: f32,
    spacing: f32,
}

impl Toolbar {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            cursor_x: rect.x + 6.0,
            spacing: 4.0,
        }
    }

    /// Add a separator
    pub fn separator(&mut self) {
        self.cursor_x += self.spacing * 2.0;
        draw_line(
            self.cursor_x,
            self.rect.y + 6.0,
            self.cursor_x,
            self.rect.bottom() - 6.0,
            1.0,
            BORDER_COLOR,
        );
        self.cursor_x += self.spacing * 2.0;
    }

    /// Add a label
    pub fn label(&mut self, text: &str, color: Color) {
        let dims = measure_text(text, None, FONT_SIZE_HEADER as u16, 1.0);
        // Round to integer pixels for crisp rendering
        let text_y = (self.rect.y + (self.rect.h + dims.height) * 0.5).round();
        draw_text(text, self.cursor_x.round(), text_y, FONT_SIZE_HEADER, color);
        self.cursor_x += dims.width + self.spacing;
    }

    /// Add a text button sized to its label
    pub fn button(&mut self, ctx: &mut UiContext, text: &str, tooltip: &str, is_active: bool) -> bool {
        let rect = self.next_rect(text);
        let clicked = toggle_button(ctx, rect, text, is_active);
        if !tooltip.is_empty() && ctx.mouse.inside(&rect) {
            ctx.set_tooltip(tooltip, ctx.mouse.x, ctx.mouse.y);
        }
        clicked
    }

    fn next_rect(&mut self, text: &str) -> Rect {
        let dims = measure_text(text, None, FONT_SIZE_CONTENT as u16, 1.0);
        let w = (dims.width + 16.0).round();
        let rect = Rect::new(self.cursor_x.round(), (self.rect.y + 4.0).round(), w, (self.rect.h - 8.0).round());
        self.cursor_x += w + self.spacing;
        rect
    }
}

/// Flat button, returns true if clicked
pub fn button(ctx: &mut UiContext, rect: Rect, text: &str) -> bool {
    toggle_button(ctx, rect, text, false)
}

/// Button with active state highlighting
pub fn toggle_button(ctx: &mut UiContext, rect: Rect, text: &str, is_active: bool) -> bool {
    let mouse = ctx.background_mouse();
    let hovered = mouse.inside(&rect);
    let bg = if is_active {
        ACCENT_COLOR
    } else if hovered {
        BUTTON_HOVER
    } else {
        BUTTON_BG
    };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, bg);
    draw_text_centered(text, &rect, FONT_SIZE_CONTENT, if is_active { WHITE } else { TEXT_COLOR });
    mouse.clicked(&rect)
}

/// Result of a stepper interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepperAction {
    None,
    /// Add this delta to the value
    Step(f64),
}

/// Numeric field with -/+ buttons. Shift-click steps ten times finer.
pub fn stepper(ctx: &mut UiContext, rect: Rect, label: &str, value: f64, step: f64) -> StepperAction {
    let btn = rect.h;
    let (minus, rest) = rect.cut_left(btn);
    let (field, plus) = rest.cut_right(btn);

    draw_rectangle(field.x, field.y, field.w, field.h, PANEL_BG);
    draw_rectangle_lines(field.x, field.y, field.w, field.h, 1.0, BORDER_COLOR);
    draw_text_centered(&format!("{} {:.3}", label, value), &field, FONT_SIZE_CONTENT, TEXT_COLOR);

    let fine = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
    let step = if fine { step * 0.1 } else { step };
    if button(ctx, minus, "-") {
        return StepperAction::Step(-step);
    }
    if button(ctx, plus, "+") {
        return StepperAction::Step(step);
    }
    StepperAction::None
}

/// Draw text centered in a rect
pub fn draw_text_centered(text: &str, rect: &Rect, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let (cx, cy) = rect.center();
    let x = (cx - dims.width * 0.5).round();
    let y = (cy + dims.offset_y * 0.5).round();
    draw_text(text, x, y, font_size, color);
}

/// Draw the tooltip requested this frame, if any
pub fn draw_tooltip(ctx: &UiContext) {
    let Some((text, x, y)) = &ctx.tooltip else {
        return;
    };
    let dims = measure_text(text, None, FONT_SIZE_CONTENT as u16, 1.0);
    let w = dims.width + 12.0;
    let h = 20.0;
    // Keep on screen
    let tx = (x + 12.0).min(screen_width() - w - 2.0).max(2.0);
    let ty = (y + 16.0).min(screen_height() - h - 2.0).max(2.0);
    draw_rectangle(tx, ty, w, h, HEADER_COLOR);
    draw_rectangle_lines(tx, ty, w, h, 1.0, BORDER_COLOR);
    draw_text(text, tx + 6.0, ty + 14.0, FONT_SIZE_CONTENT, TEXT_COLOR);
}
