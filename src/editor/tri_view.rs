//! Tri-view projection panels
//!
//! Top, front and side views of the focused box, each fitted to the box plus
//! a small margin. Drag an edge to resize (committed on release), drag inside
//! to move, right-drag to pan, wheel to zoom, middle-click to reset the view.
//! The steppers under each panel edit that panel's two dimensions.

use macroquad::prelude::*;
use crate::annotate::{ActiveDrag, BoxPatch, Edge, OrientedBox, PanelBounds, PanelHit, PanelView, Pointer};
use crate::ui::{
    begin_clip, draw_panel, draw_text_centered, end_clip, panel_content_rect, stepper, MouseState, Rect,
    StepperAction, UiContext, BOX_ACTIVE, BOX_COLOR, BOX_DIM, FONT_SIZE_CONTENT, PANEL_BG, POINT_INNER,
    POINT_OUTER, PREVIEW_COLOR, TEXT_DIM,
};
use super::EditorState;

/// Height of the stepper row under each panel
const STEPPER_ROW: f32 = 24.0;

/// Draw all three panels side by side
pub fn draw_tri_view(ctx: &mut UiContext, rect: Rect, state: &mut EditorState) {
    for (view, col) in PanelView::ALL.into_iter().zip(rect.columns(3, 4.0)) {
        draw_panel(col, Some(view.title()), PANEL_BG);
        let content = panel_content_rect(col, true);
        let (canvas, controls) = content.cut_bottom(STEPPER_ROW + 2.0);
        draw_projection(ctx, canvas, view, state);
        draw_steppers(ctx, controls.inset(1.0), view, state);
    }
}

fn local(canvas: &Rect, mouse: &MouseState) -> (f64, f64) {
    let (x, y) = canvas.local(mouse.x, mouse.y);
    (x as f64, y as f64)
}

/// Route this frame's mouse to the session for one panel
fn handle_input(ctx: &UiContext, canvas: Rect, view: PanelView, state: &mut EditorState) -> Option<Edge> {
    let mouse = ctx.background_mouse();
    let size = (canvas.w as f64, canvas.h as f64);
    let (px, py) = local(&canvas, &mouse);
    let session = &mut state.session;

    // This panel owns the active drag: follow the mouse anywhere on screen
    if session.active_drag().panel() == Some(view) {
        let pointer = Pointer::Panel { x: px, y: py };
        let is_pan = matches!(session.active_drag(), ActiveDrag::Pan { .. });
        let held = if is_pan { mouse.right_down } else { mouse.left_down };
        if held {
            session.update_drag(pointer);
        } else {
            session.end_drag(pointer);
        }
        return match session.active_drag() {
            ActiveDrag::Resize(t) => Some(t.edge),
            _ => None,
        };
    }

    if session.is_dragging() || !mouse.inside(&canvas) {
        return None;
    }

    if mouse.scroll != 0.0 {
        session.zoom(view, mouse.scroll as f64);
    }
    if is_mouse_button_pressed(MouseButton::Middle) && !ctx.modal {
        session.reset_view(view);
    }
    if mouse.right_pressed {
        session.begin_pan(view, (px, py));
        return None;
    }

    let near = state.config.edge_tolerance as f64;
    let hit = session.hit_test(view, size, (px, py), near);
    if mouse.left_pressed {
        match hit {
            PanelHit::Edge(edge) => {
                session.begin_resize(view, edge, size);
            }
            PanelHit::Inside => {
                session.begin_panel_move(view, size, (px, py));
            }
            PanelHit::Outside => {}
        }
    }
    match hit {
        PanelHit::Edge(edge) => Some(edge),
        _ => None,
    }
}

fn draw_box_rect(bounds: &PanelBounds, cuboid: &OrientedBox, canvas: &Rect, thickness: f32, color: Color) {
    let r = bounds.box_rect(cuboid);
    let x = canvas.x + r.x0 as f32;
    let y = canvas.y + r.y0 as f32;
    draw_rectangle_lines(x, y, (r.x1 - r.x0) as f32, (r.y1 - r.y0) as f32, thickness, color);
}

fn draw_edge_highlight(bounds: &PanelBounds, cuboid: &OrientedBox, canvas: &Rect, edge: Edge) {
    let r = bounds.box_rect(cuboid);
    let (x0, y0) = (canvas.x + r.x0 as f32, canvas.y + r.y0 as f32);
    let (x1, y1) = (canvas.x + r.x1 as f32, canvas.y + r.y1 as f32);
    let (ax, ay, bx, by) = match edge {
        Edge::Left => (x0, y0, x0, y1),
        Edge::Right => (x1, y0, x1, y1),
        Edge::Top => (x0, y0, x1, y0),
        Edge::Bottom => (x0, y1, x1, y1),
    };
    draw_line(ax, ay, bx, by, 3.0, BOX_ACTIVE);
}

fn draw_projection(ctx: &mut UiContext, canvas: Rect, view: PanelView, state: &mut EditorState) {
    let hover_edge = handle_input(ctx, canvas, view, state);
    let size = (canvas.w as f64, canvas.h as f64);

    let (Some(bounds), Some(cuboid)) = (state.session.panel_bounds(view, size), state.session.focused_box()) else {
        draw_text_centered("No box focused", &canvas, FONT_SIZE_CONTENT, TEXT_DIM);
        return;
    };

    begin_clip(canvas);
    let point_size = state.config.point_size;
    let points = state.panel_points(view, &bounds, &cuboid);
    for &(x, y) in &points.outer {
        draw_rectangle(canvas.x + x as f32, canvas.y + y as f32, point_size, point_size, POINT_OUTER);
    }
    for &(x, y) in &points.inner {
        draw_rectangle(canvas.x + x as f32, canvas.y + y as f32, point_size, point_size, POINT_INNER);
    }

    let resizing_here = state.session.active_drag().is_resize()
        && state.session.active_drag().panel() == Some(view);
    let outline = if resizing_here { BOX_DIM } else { BOX_COLOR };
    draw_box_rect(&bounds, &cuboid, &canvas, 2.0, outline);
    if let Some(preview) = state.session.preview_box().filter(|_| resizing_here) {
        draw_box_rect(&bounds, &preview, &canvas, 2.0, PREVIEW_COLOR);
        if let Some(edge) = hover_edge {
            draw_edge_highlight(&bounds, &preview, &canvas, edge);
        }
    } else if let Some(edge) = hover_edge {
        draw_edge_highlight(&bounds, &cuboid, &canvas, edge);
    }
    end_clip();

    let zoom = state.session.view(view).scale();
    if zoom != 1.0 {
        draw_text(&format!("{:.2}x", zoom), canvas.x + 4.0, canvas.bottom() - 4.0, FONT_SIZE_CONTENT, TEXT_DIM);
    }
    let counts = format!("{} in box", points_label(state, view));
    let dims = measure_text(&counts, None, FONT_SIZE_CONTENT as u16, 1.0);
    draw_text(&counts, canvas.right() - dims.width - 4.0, canvas.bottom() - 4.0, FONT_SIZE_CONTENT, TEXT_DIM);
}

fn points_label(state: &EditorState, view: PanelView) -> usize {
    state.panel_cache[view.index()].points.inner.len()
}

fn draw_steppers(ctx: &mut UiContext, rect: Rect, view: PanelView, state: &mut EditorState) {
    let Some(cuboid) = state.session.focused_box() else {
        return;
    };
    let (da, db) = view.dimensions();
    for (dim, cell) in [da, db].into_iter().zip(rect.columns(2, 4.0)) {
        let value = cuboid.extent(dim);
        if let StepperAction::Step(delta) = stepper(ctx, cell, dim.label(), value, 0.1) {
            // Refused while a drag is in flight
            state.session.set_focused_box(BoxPatch::single(dim, value + delta), None);
        }
    }
}
