//! Per-frame mouse snapshot and the UI context widgets share

use super::Rect;
use macroquad::prelude::*;

/// Mouse sampled once at the top of the frame. Widgets and views read this
/// copy so they all agree on what happened this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool,
    pub right_down: bool,
    pub right_pressed: bool,
    /// Vertical wheel delta, positive away from the user
    pub scroll: f32,
}

impl MouseState {
    pub fn capture() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            right_down: is_mouse_button_down(MouseButton::Right),
            right_pressed: is_mouse_button_pressed(MouseButton::Right),
            scroll: mouse_wheel().1,
        }
    }

    /// Far off-screen with nothing held
    fn inert() -> Self {
        Self { x: -1.0, y: -1.0, ..Self::default() }
    }

    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Left button went down over `rect` this frame
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && self.inside(rect)
    }
}

#[derive(Debug, Default)]
pub struct UiContext {
    pub mouse: MouseState,
    /// Split divider being dragged
    pub dragging: Option<u64>,
    /// A popup owns the mouse this frame
    pub modal: bool,
    /// (text, x, y) requested by the hovered widget
    pub tooltip: Option<(String, f32, f32)>,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per frame before any widget
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
        self.tooltip = None;
        if !mouse.left_down {
            self.dragging = None;
        }
    }

    pub fn is_dragging(&self, id: u64) -> bool {
        self.dragging == Some(id)
    }

    pub fn set_tooltip(&mut self, text: &str, x: f32, y: f32) {
        self.tooltip = Some((text.to_owned(), x, y));
    }

    /// The mouse as widgets behind a popup see it
    pub fn background_mouse(&self) -> MouseState {
        if self.modal { MouseState::inert() } else { self.mouse }
    }
}
