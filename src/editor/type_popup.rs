//! Kind confirmation popup shown after drawing a box

use macroquad::prelude::*;
use crate::annotate::ObjectKind;
use crate::ui::{button, draw_panel, toggle_button, Rect, UiContext, FONT_SIZE_CONTENT, HEADER_COLOR, TEXT_COLOR};
use super::EditorState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupAction {
    None,
    Confirm(ObjectKind),
    Discard,
}

/// Draw the popup if a drawn box is pending. Uses the unfiltered mouse;
/// everything behind it sees an inert mouse while it is open.
pub fn draw_type_popup(ctx: &mut UiContext, state: &mut EditorState) -> PopupAction {
    let (Some(pending), Some(chosen)) = (state.session.pending().copied(), state.popup_kind()) else {
        return PopupAction::None;
    };

    // Dim background
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.0, 0.0, 0.45));

    let w = 420.0;
    let h = 150.0;
    let rect = Rect::new(((screen_width() - w) * 0.5).round(), ((screen_height() - h) * 0.5).round(), w, h);
    draw_panel(rect, Some("New box"), HEADER_COLOR);

    let b = pending.cuboid;
    draw_text(
        &format!("W {:.3}  L {:.3}  H {:.3}   suggested: {}", b.width, b.length, b.height, pending.suggested),
        rect.x + 10.0,
        rect.y + 40.0,
        FONT_SIZE_CONTENT,
        TEXT_COLOR,
    );

    // Popup widgets read the real mouse; background widgets see ctx.modal
    let was_modal = ctx.modal;
    ctx.modal = false;
    let mut action = PopupAction::None;

    let kinds_row = Rect::new(rect.x + 10.0, rect.y + 56.0, rect.w - 20.0, 28.0);
    for (i, (kind, cell)) in ObjectKind::ALL.into_iter().zip(kinds_row.columns(5, 6.0)).enumerate() {
        let label = format!("{} {}", i + 1, kind.as_str());
        if toggle_button(ctx, cell, &label, kind == chosen) {
            state.popup_choice = Some(kind);
        }
    }

    let buttons = Rect::new(rect.x + 10.0, rect.bottom() - 40.0, rect.w - 20.0, 28.0).columns(2, 10.0);
    if button(ctx, buttons[0], "Create (Enter)") {
        action = PopupAction::Confirm(state.popup_kind().unwrap_or(chosen));
    }
    if button(ctx, buttons[1], "Discard (Esc)") {
        action = PopupAction::Discard;
    }
    ctx.modal = was_modal;
    action
}
