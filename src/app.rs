//! Application state
//!
//! Owns the editor and routes toolbar actions and keyboard shortcuts to it.
//! File dialogs only exist on native targets.

use crate::annotate::ObjectKind;
use crate::config::EditorConfig;
use crate::editor::{EditorAction, EditorLayout, EditorState};
use macroquad::prelude::*;
use std::path::{Path, PathBuf};

pub struct AppState {
    pub editor: EditorState,
    pub layout: EditorLayout,
}

impl AppState {
    pub fn new(config: EditorConfig, config_path: PathBuf) -> Self {
        Self {
            editor: EditorState::new(config, config_path),
            layout: EditorLayout::new(),
        }
    }

    pub fn open_cloud(&mut self, path: &Path) {
        match self.editor.open_cloud(path) {
            Ok(n) => {
                let message = match self.editor.cloud.as_ref().and_then(|c| c.bounds) {
                    Some(b) => {
                        let size = b.size();
                        format!("Loaded {} points ({:.1} x {:.1} x {:.1} m)", n, size.x, size.y, size.z)
                    }
                    None => format!("Loaded {} points", n),
                };
                self.editor.set_status(&message, 3.0);
            }
            Err(e) => self.editor.set_error(&format!("Open cloud failed: {}", e)),
        }
    }

    pub fn open_document(&mut self, path: &Path) {
        match self.editor.open_document(path) {
            Ok(n) => self.editor.set_status(&format!("Loaded {} annotations", n), 3.0),
            Err(e) => self.editor.set_error(&format!("Open failed: {}", e)),
        }
    }

    fn save_to(&mut self, path: &Path) {
        match self.editor.save_document_to(path) {
            Ok(()) => self.editor.set_status(&format!("Saved {}", path.display()), 3.0),
            Err(e) => self.editor.set_error(&format!("Save failed: {}", e)),
        }
    }

    /// Save to the current document, asking for a path if there is none
    fn save(&mut self) {
        match self.editor.document_path.clone() {
            Some(path) => self.save_to(&path),
            None => self.handle_action(EditorAction::SaveAs),
        }
    }

    pub fn handle_action(&mut self, action: EditorAction) {
        match action {
            EditorAction::None => {}
            EditorAction::Save => self.save(),
            #[cfg(not(target_arch = "wasm32"))]
            EditorAction::OpenCloud => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Point cloud", &["pcd", "ply", "xyz", "txt"])
                    .pick_file()
                {
                    self.open_cloud(&path);
                }
            }
            #[cfg(not(target_arch = "wasm32"))]
            EditorAction::OpenDocument => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Annotations", &["ron"])
                    .pick_file()
                {
                    self.open_document(&path);
                }
            }
            #[cfg(not(target_arch = "wasm32"))]
            EditorAction::SaveAs => {
                let stem = self
                    .editor
                    .cloud_path
                    .as_ref()
                    .and_then(|p| p.file_stem())
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "annotations".to_string());
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Annotations", &["ron"])
                    .set_file_name(format!("{}.ron", stem))
                    .save_file()
                {
                    self.save_to(&path);
                }
            }
            #[cfg(not(target_arch = "wasm32"))]
            EditorAction::ExportJson => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .set_file_name("annotations.json")
                    .save_file()
                {
                    match self.editor.export_json_to(&path) {
                        Ok(()) => self.editor.set_status(&format!("Exported {}", path.display()), 3.0),
                        Err(e) => self.editor.set_error(&format!("Export failed: {}", e)),
                    }
                }
            }
            #[cfg(target_arch = "wasm32")]
            _ => self.editor.set_status("File dialogs are not available on this platform", 3.0),
        }
    }

    /// Keyboard shortcuts
    pub fn handle_shortcuts(&mut self) {
        let ctrl = is_key_down(KeyCode::LeftControl)
            || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper)
            || is_key_down(KeyCode::RightSuper);

        // The popup captures its own keys
        if self.editor.session.pending().is_some() {
            let keys = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4, KeyCode::Key5];
            for (key, kind) in keys.into_iter().zip(ObjectKind::ALL) {
                if is_key_pressed(key) {
                    self.editor.popup_choice = Some(kind);
                }
            }
            if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
                if let Some(kind) = self.editor.popup_kind() {
                    self.editor.confirm_popup(kind);
                }
            } else if is_key_pressed(KeyCode::Escape) {
                self.editor.discard_popup();
            }
            return;
        }

        if ctrl && is_key_pressed(KeyCode::S) {
            self.handle_action(EditorAction::Save);
        } else if ctrl && is_key_pressed(KeyCode::O) {
            self.handle_action(EditorAction::OpenCloud);
        } else if ctrl {
            return;
        }

        if is_key_pressed(KeyCode::D) {
            self.editor.draw_mode = !self.editor.draw_mode;
        }
        if is_key_pressed(KeyCode::Tab) {
            self.editor.session.focus_next();
        }
        if is_key_pressed(KeyCode::Delete) || is_key_pressed(KeyCode::Backspace) {
            if let Some(id) = self.editor.session.delete_focused() {
                self.editor.set_status(&format!("Deleted {}", id), 2.0);
            }
        }
    }
}
