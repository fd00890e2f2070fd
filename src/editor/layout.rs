//! Editor layout and rendering

use macroquad::prelude::*;
use crate::ui::{
    draw_panel, draw_tooltip, panel_content_rect, Rect, SplitDir, SplitPanel, Toolbar, UiContext, BG_COLOR,
    ERROR_COLOR, FONT_SIZE_CONTENT, HEADER_COLOR, PANEL_BG, TEXT_COLOR, TEXT_DIM,
};
use super::attribute_panel::draw_attribute_panel;
use super::bird_view::draw_bird_view;
use super::tri_view::draw_tri_view;
use super::type_popup::{draw_type_popup, PopupAction};
use super::EditorState;

/// Actions that need the application (file dialogs, quitting)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorAction {
    None,
    OpenCloud,
    OpenDocument,
    Save,
    SaveAs,
    ExportJson,
}

/// Editor layout state (split panel ratios)
pub struct EditorLayout {
    /// Vertical split (ground view + attributes / projection panels)
    pub main_split: SplitPanel,
    /// Horizontal split (ground view | attribute list)
    pub top_split: SplitPanel,
}

impl EditorLayout {
    pub fn new() -> Self {
        Self {
            main_split: SplitPanel::new(1, SplitDir::Vertical, 0.62),
            top_split: SplitPanel::new(2, SplitDir::Horizontal, 0.7),
        }
    }
}

impl Default for EditorLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw the complete editor UI, returns action if triggered
pub fn draw_editor(ctx: &mut UiContext, layout: &mut EditorLayout, state: &mut EditorState) -> EditorAction {
    let screen = Rect::new(0.0, 0.0, screen_width(), screen_height());
    clear_background(BG_COLOR);
    ctx.modal = state.session.pending().is_some();

    let toolbar_height = 32.0;
    let status_height = 22.0;
    let (toolbar_rect, rest) = screen.cut_top(toolbar_height);
    let (main_rect, status_rect) = rest.cut_bottom(status_height);

    let action = draw_toolbar(ctx, toolbar_rect, state);

    let locked = state.session.is_dragging();
    let (top_rect, bottom_rect) = layout.main_split.update(ctx, main_rect, locked);
    let (ground_rect, attr_rect) = layout.top_split.update(ctx, top_rect, locked);

    draw_panel(ground_rect, Some("Ground (bird's-eye)"), PANEL_BG);
    draw_bird_view(ctx, panel_content_rect(ground_rect, true), state);

    draw_panel(attr_rect, Some("Annotations"), PANEL_BG);
    draw_attribute_panel(ctx, panel_content_rect(attr_rect, true), state);

    draw_tri_view(ctx, bottom_rect, state);

    draw_status_bar(status_rect, state);

    match draw_type_popup(ctx, state) {
        PopupAction::Confirm(kind) => {
            state.confirm_popup(kind);
        }
        PopupAction::Discard => state.discard_popup(),
        PopupAction::None => {}
    }

    draw_tooltip(ctx);
    action
}

fn draw_toolbar(ctx: &mut UiContext, rect: Rect, state: &mut EditorState) -> EditorAction {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, HEADER_COLOR);
    let mut toolbar = Toolbar::new(rect);
    let mut action = EditorAction::None;

    if toolbar.button(ctx, "Open Cloud", "Open a point cloud (Ctrl+O)", false) {
        action = EditorAction::OpenCloud;
    }
    if toolbar.button(ctx, "Open", "Open annotations", false) {
        action = EditorAction::OpenDocument;
    }
    if toolbar.button(ctx, "Save", "Save annotations (Ctrl+S)", false) {
        action = EditorAction::Save;
    }
    if toolbar.button(ctx, "Save As", "", false) {
        action = EditorAction::SaveAs;
    }
    if toolbar.button(ctx, "Export JSON", "Write annotations as JSON", false) {
        action = EditorAction::ExportJson;
    }
    toolbar.separator();

    if toolbar.button(ctx, "Draw", "Drag on the ground to add a box (D)", state.draw_mode) {
        state.draw_mode = !state.draw_mode;
    }
    if toolbar.button(ctx, "Next", "Focus next annotation (Tab)", false) {
        state.session.focus_next();
    }
    if toolbar.button(ctx, "Delete", "Delete focused annotation (Del)", false) {
        state.session.delete_focused();
    }
    toolbar.separator();

    let summary = match state.session.annotations().focused() {
        Some(a) => format!("{} annotations | {} {}", state.session.annotations().len(), a.id, a.kind),
        None => format!("{} annotations", state.session.annotations().len()),
    };
    toolbar.label(&summary, TEXT_DIM);
    action
}

fn draw_status_bar(rect: Rect, state: &EditorState) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, HEADER_COLOR);

    if let Some(msg) = state.get_status() {
        let color = if state.status_is_error { ERROR_COLOR } else { TEXT_COLOR };
        draw_text(msg, rect.x + 8.0, rect.y + 15.0, FONT_SIZE_CONTENT, color);
    }

    let cloud = match (&state.cloud_path, &state.cloud) {
        (Some(path), Some(cloud)) => format!(
            "{} ({} pts)",
            path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
            cloud.len()
        ),
        _ => "no cloud".to_string(),
    };
    let doc = state
        .document_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string());
    let right = format!("{} | {}{}", cloud, doc, if state.is_dirty() { " *" } else { "" });
    let dims = measure_text(&right, None, FONT_SIZE_CONTENT as u16, 1.0);
    draw_text(&right, rect.right() - dims.width - 8.0, rect.y + 15.0, FONT_SIZE_CONTENT, TEXT_DIM);
}
