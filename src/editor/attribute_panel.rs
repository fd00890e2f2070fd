//! Attribute list
//!
//! One row per annotation (click to focus), with kind/group/ghost controls
//! and a detail block for the focused box.

use macroquad::prelude::*;
use crate::annotate::{suggest_for, Axis, BoxPatch};
use crate::cloud::points_in_box;
use crate::ui::{
    begin_clip, end_clip, stepper, toggle_button, Rect, StepperAction, UiContext, ACCENT_COLOR, BORDER_COLOR,
    BUTTON_HOVER, FONT_SIZE_CONTENT, TEXT_COLOR, TEXT_DIM,
};
use super::EditorState;

const ROW_HEIGHT: f32 = 24.0;
const DETAIL_HEIGHT: f32 = 128.0;

/// Deferred row action (applied after the list is drawn)
enum RowAction {
    Focus(String),
    CycleKind(String),
    ToggleGroup(String),
    ToggleGhost(String),
}

pub fn draw_attribute_panel(ctx: &mut UiContext, rect: Rect, state: &mut EditorState) {
    let (list_rect, detail_rect) = rect.cut_bottom(DETAIL_HEIGHT);
    draw_annotation_list(ctx, list_rect, state);
    draw_focused_details(ctx, detail_rect, state);
}

fn draw_annotation_list(ctx: &mut UiContext, rect: Rect, state: &mut EditorState) {
    let mouse = ctx.background_mouse();
    if mouse.inside(&rect) && mouse.scroll != 0.0 {
        state.attribute_scroll -= mouse.scroll.signum() * ROW_HEIGHT;
    }
    let total = state.session.annotations().len() as f32 * ROW_HEIGHT;
    state.attribute_scroll = state.attribute_scroll.clamp(0.0, (total - rect.h).max(0.0));

    if state.session.annotations().is_empty() {
        draw_text("No annotations. Press D and drag on the ground.", rect.x + 4.0, rect.y + 16.0, FONT_SIZE_CONTENT, TEXT_DIM);
        return;
    }

    let focused = state.session.annotations().focused_id().map(str::to_string);
    let mut action = None;
    begin_clip(rect);
    for (i, a) in state.session.annotations().iter().enumerate() {
        let y = rect.y + i as f32 * ROW_HEIGHT - state.attribute_scroll;
        if y + ROW_HEIGHT < rect.y || y > rect.bottom() {
            continue;
        }
        let row = Rect::new(rect.x, y, rect.w, ROW_HEIGHT - 2.0);
        let is_focused = focused.as_deref() == Some(a.id.as_str());
        if is_focused {
            draw_rectangle(row.x, row.y, row.w, row.h, ACCENT_COLOR);
        } else if mouse.inside(&row) {
            draw_rectangle(row.x, row.y, row.w, row.h, BUTTON_HOVER);
        }
        draw_text(&a.id, row.x + 6.0, row.y + 15.0, FONT_SIZE_CONTENT, TEXT_COLOR);

        // Controls from the right edge
        let ghost_rect = Rect::new(row.right() - 52.0, row.y + 2.0, 48.0, row.h - 4.0);
        let group_rect = Rect::new(ghost_rect.x - 52.0, row.y + 2.0, 48.0, row.h - 4.0);
        let kind_rect = Rect::new(group_rect.x - 92.0, row.y + 2.0, 88.0, row.h - 4.0);

        if toggle_button(ctx, kind_rect, a.kind.as_str(), false) {
            action = Some(RowAction::CycleKind(a.id.clone()));
        } else if toggle_button(ctx, group_rect, "group", a.group) {
            action = Some(RowAction::ToggleGroup(a.id.clone()));
        } else if toggle_button(ctx, ghost_rect, "ghost", a.ghost) {
            action = Some(RowAction::ToggleGhost(a.id.clone()));
        } else if mouse.clicked(&row) {
            action = Some(RowAction::Focus(a.id.clone()));
        }
    }
    end_clip();

    let session = &mut state.session;
    match action {
        Some(RowAction::Focus(id)) => {
            session.focus(Some(&id));
        }
        Some(RowAction::CycleKind(id)) => {
            if let Some(kind) = session.annotations().get(&id).map(|a| a.kind.next()) {
                session.set_kind(&id, kind);
            }
        }
        Some(RowAction::ToggleGroup(id)) => {
            session.toggle_group(&id);
        }
        Some(RowAction::ToggleGhost(id)) => {
            session.toggle_ghost(&id);
        }
        None => {}
    }
}

fn draw_focused_details(ctx: &mut UiContext, rect: Rect, state: &mut EditorState) {
    draw_line(rect.x, rect.y, rect.right(), rect.y, 1.0, BORDER_COLOR);
    let Some(cuboid) = state.session.focused_box() else {
        return;
    };
    let mut y = rect.y + 16.0;
    let line = |text: &str, y: f32, color: Color| draw_text(text, rect.x + 6.0, y, FONT_SIZE_CONTENT, color);

    line(
        &format!("W {:.3}  L {:.3}  H {:.3}  ({:.2} m3)", cuboid.width, cuboid.length, cuboid.height, cuboid.volume()),
        y,
        TEXT_COLOR,
    );
    y += 16.0;
    let inside = state.cloud.as_ref().map_or(0, |c| points_in_box(&cuboid, &c.points));
    line(&format!("{} points inside, looks like {}", inside, suggest_for(&cuboid)), y, TEXT_DIM);
    y += 8.0;

    // Center steppers, one row per axis
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        let cell = Rect::new(rect.x + 4.0, y, rect.w - 8.0, 22.0);
        let label = match axis {
            Axis::X => "cx",
            Axis::Y => "cy",
            Axis::Z => "cz",
        };
        let value = cuboid.center.get(axis);
        if let StepperAction::Step(delta) = stepper(ctx, cell, label, value, 0.1) {
            let center = cuboid.center.with(axis, value + delta);
            state.session.set_focused_box(BoxPatch::new(), Some(center));
        }
        y += 26.0;
    }
}
