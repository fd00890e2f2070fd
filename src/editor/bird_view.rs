//! Bird's-eye ground view
//!
//! Top-down X-Z view of the whole cloud and every annotation footprint.
//! Left-drag draws a new box (draw mode) or moves the focused one, a click
//! picks a box, right-drag pans, wheel zooms around the cursor.
//!
//! Screen Y grows with world Z, matching the Top projection panel.

use macroquad::prelude::*;
use crate::annotate::{Axis, OrientedBox, Pointer};
use crate::ui::{
    begin_clip, end_clip, Rect, UiContext, BOX_COLOR, BOX_DIM, FONT_SIZE_CONTENT, GRID_AXIS, GRID_COLOR,
    PANEL_BG, POINT_OUTER, PREVIEW_COLOR, TEXT_DIM,
};
use super::EditorState;

/// Zoom limits (pixels per meter)
const MIN_PPM: f32 = 2.0;
const MAX_PPM: f32 = 400.0;

/// Top-down view transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundView {
    /// Pixels per meter
    pub ppm: f32,
    /// Pixel offset of the world origin from the view center
    pub offset: (f32, f32),
    /// Last mouse position while right-dragging
    pub panning: Option<(f32, f32)>,
}

impl GroundView {
    pub fn new(ppm: f32) -> Self {
        Self {
            ppm: ppm.clamp(MIN_PPM, MAX_PPM),
            offset: (0.0, 0.0),
            panning: None,
        }
    }

    pub fn world_to_screen(&self, rect: &Rect, x: f64, z: f64) -> (f32, f32) {
        let (cx, cy) = rect.center();
        (cx + self.offset.0 + x as f32 * self.ppm, cy + self.offset.1 + z as f32 * self.ppm)
    }

    pub fn screen_to_world(&self, rect: &Rect, sx: f32, sy: f32) -> (f64, f64) {
        let (cx, cy) = rect.center();
        (
            ((sx - cx - self.offset.0) / self.ppm) as f64,
            ((sy - cy - self.offset.1) / self.ppm) as f64,
        )
    }

    /// Zoom one wheel notch, keeping the world point under the cursor fixed
    pub fn zoom_at(&mut self, rect: &Rect, sx: f32, sy: f32, scroll: f32) {
        if scroll == 0.0 {
            return;
        }
        let (wx, wz) = self.screen_to_world(rect, sx, sy);
        let factor = if scroll > 0.0 { 1.1 } else { 0.9 };
        self.ppm = (self.ppm * factor).clamp(MIN_PPM, MAX_PPM);
        let (cx, cy) = rect.center();
        self.offset = (sx - cx - wx as f32 * self.ppm, sy - cy - wz as f32 * self.ppm);
    }

    /// Center the view on a ground point
    pub fn look_at(&mut self, x: f64, z: f64) {
        self.offset = (-(x as f32) * self.ppm, -(z as f32) * self.ppm);
    }

    /// Grid spacing giving roughly 20+ pixels between lines
    pub fn grid_step(&self) -> f64 {
        [1.0, 5.0, 10.0, 50.0, 100.0]
            .into_iter()
            .find(|step| step * self.ppm as f64 >= 20.0)
            .unwrap_or(100.0)
    }
}

fn footprint_rect(view: &GroundView, rect: &Rect, b: &OrientedBox) -> Rect {
    let (x0, x1) = b.edges(Axis::X);
    let (z0, z1) = b.edges(Axis::Z);
    let (sx0, sy0) = view.world_to_screen(rect, x0, z0);
    let (sx1, sy1) = view.world_to_screen(rect, x1, z1);
    Rect::new(sx0, sy0, sx1 - sx0, sy1 - sy0)
}

fn draw_footprint(view: &GroundView, rect: &Rect, b: &OrientedBox, thickness: f32, color: Color) {
    let r = footprint_rect(view, rect, b);
    draw_rectangle_lines(r.x, r.y, r.w.max(1.0), r.h.max(1.0), thickness, color);
}

/// Handle ground-view input: zoom, pan and the left-button gestures
fn handle_input(ctx: &UiContext, rect: Rect, state: &mut EditorState) {
    let mouse = ctx.background_mouse();
    let inside = mouse.inside(&rect);

    if inside && mouse.scroll != 0.0 {
        state.ground.zoom_at(&rect, mouse.x, mouse.y, mouse.scroll);
    }

    // Pan with right mouse button
    if mouse.right_down && (inside || state.ground.panning.is_some()) {
        if let Some((lx, ly)) = state.ground.panning {
            state.ground.offset.0 += mouse.x - lx;
            state.ground.offset.1 += mouse.y - ly;
        }
        state.ground.panning = Some((mouse.x, mouse.y));
    } else {
        state.ground.panning = None;
    }

    let (x, z) = state.ground.screen_to_world(&rect, mouse.x, mouse.y);
    let pointer = Pointer::Ground { x, z };
    let session = &mut state.session;

    // Ground drags follow the mouse even outside the view
    if session.active_drag().is_ground() {
        if mouse.left_down {
            session.update_drag(pointer);
        } else if session.active_drag().is_draw() {
            if session.end_drag(pointer).is_some() {
                state.popup_choice = None;
            }
        } else {
            session.end_drag(pointer);
        }
        return;
    }

    if !(inside && mouse.left_pressed) || session.is_dragging() {
        return;
    }
    if state.draw_mode {
        if !session.begin_draw((x, z)) {
            state.set_status("Confirm or discard the drawn box first", 2.0);
        }
    } else if !session.begin_ground_move((x, z)) && session.pick_ground(x, z) {
        session.begin_ground_move((x, z));
    }
}

/// Draw the ground view and process its input
pub fn draw_bird_view(ctx: &mut UiContext, rect: Rect, state: &mut EditorState) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, PANEL_BG);
    handle_input(ctx, rect, state);

    let view = state.ground;
    begin_clip(rect);

    // Grid
    let step = view.grid_step();
    let (min_x, min_z) = view.screen_to_world(&rect, rect.x, rect.y);
    let (max_x, max_z) = view.screen_to_world(&rect, rect.right(), rect.bottom());
    let mut gx = (min_x / step).floor() * step;
    while gx <= max_x {
        let (sx, _) = view.world_to_screen(&rect, gx, 0.0);
        let color = if gx.abs() < step * 0.01 { GRID_AXIS } else { GRID_COLOR };
        draw_line(sx, rect.y, sx, rect.bottom(), 1.0, color);
        gx += step;
    }
    let mut gz = (min_z / step).floor() * step;
    while gz <= max_z {
        let (_, sy) = view.world_to_screen(&rect, 0.0, gz);
        let color = if gz.abs() < step * 0.01 { GRID_AXIS } else { GRID_COLOR };
        draw_line(rect.x, sy, rect.right(), sy, 1.0, color);
        gz += step;
    }

    // Points, sampled
    if let Some(cloud) = &state.cloud {
        let max = state.config.max_panel_points.max(1);
        let stride = cloud.len().div_ceil(max).max(1);
        let size = state.config.point_size;
        for p in cloud.points.iter().step_by(stride) {
            let (sx, sy) = view.world_to_screen(&rect, p.x, p.z);
            if rect.contains(sx, sy) {
                draw_rectangle(sx, sy, size, size, POINT_OUTER);
            }
        }
    }

    // Footprints
    let focused = state.session.annotations().focused_id().map(str::to_string);
    for a in state.session.annotations().iter() {
        let is_focused = focused.as_deref() == Some(a.id.as_str());
        let color = if is_focused { BOX_COLOR } else { BOX_DIM };
        draw_footprint(&view, &rect, &a.cuboid, if is_focused { 2.0 } else { 1.0 }, color);
        let r = footprint_rect(&view, &rect, &a.cuboid);
        let label = if a.ghost { format!("{} {} (ghost)", a.id, a.kind) } else { format!("{} {}", a.id, a.kind) };
        draw_text(&label, r.x, r.y - 3.0, FONT_SIZE_CONTENT, color);
    }
    if let Some(preview) = state.session.preview_box().filter(|_| state.session.active_drag().is_draw()) {
        draw_footprint(&view, &rect, &preview, 2.0, PREVIEW_COLOR);
    }
    if let Some(pending) = state.session.pending() {
        draw_footprint(&view, &rect, &pending.cuboid, 2.0, PREVIEW_COLOR);
    }

    end_clip();

    // Overlay text
    let mouse = ctx.background_mouse();
    if mouse.inside(&rect) {
        let (x, z) = view.screen_to_world(&rect, mouse.x, mouse.y);
        draw_text(&format!("x {:.2}  z {:.2}", x, z), rect.x + 6.0, rect.bottom() - 6.0, FONT_SIZE_CONTENT, TEXT_DIM);
    }
    if state.draw_mode {
        draw_text("DRAW: drag on the ground to add a box", rect.x + 6.0, rect.y + 16.0, FONT_SIZE_CONTENT, PREVIEW_COLOR);
    }
    let scale = format!("grid {} m", step);
    let dims = measure_text(&scale, None, FONT_SIZE_CONTENT as u16, 1.0);
    draw_text(&scale, rect.right() - dims.width - 6.0, rect.bottom() - 6.0, FONT_SIZE_CONTENT, TEXT_DIM);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_rect() -> Rect {
        Rect::new(100.0, 50.0, 400.0, 300.0)
    }

    #[test]
    fn test_screen_world_round_trip() {
        let mut view = GroundView::new(40.0);
        view.offset = (13.0, -7.0);
        let rect = view_rect();
        let (sx, sy) = view.world_to_screen(&rect, 2.5, -1.25);
        let (x, z) = view.screen_to_world(&rect, sx, sy);
        assert!((x - 2.5).abs() < 1e-4);
        assert!((z + 1.25).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_keeps_cursor_point() {
        let mut view = GroundView::new(40.0);
        let rect = view_rect();
        let before = view.screen_to_world(&rect, 420.0, 90.0);
        view.zoom_at(&rect, 420.0, 90.0, 1.0);
        assert!((view.ppm - 44.0).abs() < 1e-4);
        let after = view.screen_to_world(&rect, 420.0, 90.0);
        assert!((before.0 - after.0).abs() < 1e-4);
        assert!((before.1 - after.1).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut view = GroundView::new(1000.0);
        assert_eq!(view.ppm, MAX_PPM);
        for _ in 0..100 {
            view.zoom_at(&view_rect(), 0.0, 0.0, -1.0);
        }
        assert_eq!(view.ppm, MIN_PPM);
    }

    #[test]
    fn test_look_at_centers_point() {
        let mut view = GroundView::new(20.0);
        view.look_at(12.0, -3.0);
        let rect = view_rect();
        let (x, z) = view.screen_to_world(&rect, rect.center().0, rect.center().1);
        assert!((x - 12.0).abs() < 1e-4 && (z + 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_grid_step_scales_with_zoom() {
        assert_eq!(GroundView::new(40.0).grid_step(), 1.0);
        assert_eq!(GroundView::new(5.0).grid_step(), 5.0);
        assert_eq!(GroundView::new(2.0).grid_step(), 10.0);
    }
}
