//! Editor state and data

use std::path::{Path, PathBuf};
use crate::annotate::{
    EditorSession, ObjectKind, OrientedBox, PanelBounds, PanelView, SessionSettings,
};
use crate::cloud::{load_cloud, partition_for_panel, CloudError, PanelPoints, PointCloud};
use crate::config::EditorConfig;
use crate::document::{load_document, save_document, export_json, AnnotationDocument, DocumentError};
use super::bird_view::GroundView;

/// Panel point partition, reused while the mapping and box stay the same
#[derive(Debug, Clone, Default)]
pub struct PanelCache {
    key: Option<(PanelBounds, OrientedBox, usize)>,
    pub points: PanelPoints,
}

impl PanelCache {
    /// Points for this panel, recomputed only when the inputs changed
    pub fn get(
        &mut self,
        bounds: &PanelBounds,
        cuboid: &OrientedBox,
        cloud: Option<&PointCloud>,
        max_points: usize,
    ) -> &PanelPoints {
        let len = cloud.map_or(0, PointCloud::len);
        let key = (*bounds, *cuboid, len);
        if self.key != Some(key) {
            self.points = match cloud {
                Some(c) => partition_for_panel(bounds, cuboid, &c.points, max_points),
                None => PanelPoints::default(),
            };
            self.key = Some(key);
        }
        &self.points
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Everything the editor window owns
pub struct EditorState {
    pub session: EditorSession,
    pub config: EditorConfig,
    pub config_path: PathBuf,

    pub cloud: Option<PointCloud>,
    pub cloud_path: Option<PathBuf>,
    /// Current annotation file (None = never saved)
    pub document_path: Option<PathBuf>,
    /// Session revision at the last save/load
    saved_revision: u64,

    /// Left-drag on the ground draws a new box instead of moving/picking
    pub draw_mode: bool,
    pub ground: GroundView,
    /// Kind picked in the confirmation popup (None = use the suggestion)
    pub popup_choice: Option<ObjectKind>,
    pub panel_cache: [PanelCache; 3],
    pub attribute_scroll: f32,

    /// Status message with expiry time
    status_message: Option<(String, f64)>,
    pub status_is_error: bool,
}

impl EditorState {
    pub fn new(config: EditorConfig, config_path: PathBuf) -> Self {
        let settings = SessionSettings {
            panel_pad: config.panel_pad as f64,
            default_box_height: config.default_box_height,
        };
        Self {
            session: EditorSession::new(settings),
            ground: GroundView::new(config.ground_zoom),
            config,
            config_path,
            cloud: None,
            cloud_path: None,
            document_path: None,
            saved_revision: 0,
            draw_mode: false,
            popup_choice: None,
            panel_cache: Default::default(),
            attribute_scroll: 0.0,
            status_message: None,
            status_is_error: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.session.revision() != self.saved_revision
    }

    /// Set a status message that expires after a duration
    pub fn set_status(&mut self, message: &str, duration_secs: f64) {
        let expiry = macroquad::time::get_time() + duration_secs;
        self.status_message = Some((message.to_string(), expiry));
        self.status_is_error = false;
    }

    /// Error status: logged and shown longer
    pub fn set_error(&mut self, message: &str) {
        log::error!("{}", message);
        self.set_status(message, 6.0);
        self.status_is_error = true;
    }

    /// Get current status message if not expired
    pub fn get_status(&self) -> Option<&str> {
        if let Some((msg, expiry)) = &self.status_message {
            if macroquad::time::get_time() < *expiry {
                return Some(msg);
            }
        }
        None
    }

    /// Kind the popup will confirm with
    pub fn popup_kind(&self) -> Option<ObjectKind> {
        let pending = self.session.pending()?;
        Some(self.popup_choice.unwrap_or(pending.suggested))
    }

    pub fn confirm_popup(&mut self, kind: ObjectKind) -> Option<String> {
        self.popup_choice = None;
        self.draw_mode = false;
        self.session.confirm_pending(kind)
    }

    pub fn discard_popup(&mut self) {
        self.popup_choice = None;
        self.session.discard_pending();
    }

    /// Replace the loaded point cloud; returns the number of points
    pub fn open_cloud(&mut self, path: &Path) -> Result<usize, CloudError> {
        let cloud = load_cloud(path, self.config.z_up_source)?;
        let n = cloud.len();
        if cloud.is_empty() {
            log::warn!("{} contains no points", path.display());
        }
        if let Some(b) = cloud.bounds {
            self.ground.look_at(b.center().x, b.center().z);
        }
        self.cloud = Some(cloud);
        self.cloud_path = Some(path.to_path_buf());
        for cache in &mut self.panel_cache {
            cache.clear();
        }
        Ok(n)
    }

    /// Load annotations from a document. When no cloud is loaded yet, the
    /// document's cloud is opened too (relative paths resolve against the
    /// document's directory); a failure there is only logged.
    pub fn open_document(&mut self, path: &Path) -> Result<usize, DocumentError> {
        let doc = load_document(path)?;
        let n = doc.annotations.len();
        self.session.replace_annotations(doc.to_set());
        self.saved_revision = self.session.revision();
        self.document_path = Some(path.to_path_buf());
        self.remember_document(path);

        if self.cloud.is_none() {
            if let Some(cloud) = &doc.cloud {
                let mut cloud_path = PathBuf::from(cloud);
                if cloud_path.is_relative() {
                    if let Some(dir) = path.parent() {
                        cloud_path = dir.join(cloud_path);
                    }
                }
                if let Err(e) = self.open_cloud(&cloud_path) {
                    log::warn!("Could not open cloud {}: {}", cloud_path.display(), e);
                }
            }
        }
        Ok(n)
    }

    fn document(&self) -> AnnotationDocument {
        let cloud = self.cloud_path.as_ref().map(|p| p.display().to_string());
        AnnotationDocument::new(cloud, self.session.annotations())
    }

    pub fn save_document_to(&mut self, path: &Path) -> Result<(), DocumentError> {
        save_document(&self.document(), path)?;
        self.saved_revision = self.session.revision();
        self.document_path = Some(path.to_path_buf());
        self.remember_document(path);
        Ok(())
    }

    pub fn export_json_to(&self, path: &Path) -> Result<(), DocumentError> {
        export_json(&self.document(), path)
    }

    fn remember_document(&mut self, path: &Path) {
        let path = path.display().to_string();
        if self.config.last_document.as_deref() == Some(path.as_str()) {
            return;
        }
        self.config.last_document = Some(path);
        if let Err(e) = self.config.save(&self.config_path) {
            log::warn!("Could not save config: {}", e);
        }
    }

    /// Cached panel points for the mapping and box currently shown
    pub fn panel_points(&mut self, panel: PanelView, bounds: &PanelBounds, cuboid: &OrientedBox) -> &PanelPoints {
        let max = self.config.max_panel_points;
        self.panel_cache[panel.index()].get(bounds, cuboid, self.cloud.as_ref(), max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::Pointer;

    fn state_in(dir: &Path) -> EditorState {
        EditorState::new(EditorConfig::default(), dir.join("config.ron"))
    }

    fn draw_one(state: &mut EditorState) -> String {
        state.session.begin_draw((0.0, 0.0));
        state.session.end_drag(Pointer::Ground { x: 1.8, z: 4.4 });
        state.confirm_popup(state.popup_kind().unwrap()).unwrap()
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scan.xyz"), "0 0 0\n1 1 1\n").unwrap();
        let doc_path = dir.path().join("scene.ron");

        let mut state = state_in(dir.path());
        state.open_cloud(&dir.path().join("scan.xyz")).unwrap();
        draw_one(&mut state);
        assert!(state.is_dirty());
        state.save_document_to(&doc_path).unwrap();
        assert!(!state.is_dirty());

        let mut fresh = state_in(dir.path());
        assert_eq!(fresh.open_document(&doc_path).unwrap(), 1);
        assert!(!fresh.is_dirty());
        assert_eq!(fresh.cloud.as_ref().map(PointCloud::len), Some(2));
        assert_eq!(fresh.config.last_document, Some(doc_path.display().to_string()));
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_popup_uses_suggestion_unless_overridden() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.draw_mode = true;
        state.session.begin_draw((0.0, 0.0));
        state.session.end_drag(Pointer::Ground { x: 0.4, z: 0.4 });
        assert_eq!(state.popup_kind(), Some(ObjectKind::Car));
        state.popup_choice = Some(ObjectKind::Cone);
        assert_eq!(state.popup_kind(), Some(ObjectKind::Cone));

        let id = state.confirm_popup(ObjectKind::Cone).unwrap();
        assert_eq!(state.session.annotations().get(&id).unwrap().kind, ObjectKind::Cone);
        assert!(state.popup_choice.is_none());
        assert!(!state.draw_mode);
        assert_eq!(state.popup_kind(), None);
    }

    #[test]
    fn test_open_cloud_failure_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.xyz"), "1 2 3\n").unwrap();
        std::fs::write(dir.path().join("b.xyz"), "1 2\n").unwrap();
        let mut state = state_in(dir.path());
        state.open_cloud(&dir.path().join("a.xyz")).unwrap();
        assert!(state.open_cloud(&dir.path().join("b.xyz")).is_err());
        assert_eq!(state.cloud_path, Some(dir.path().join("a.xyz")));
    }

    #[test]
    fn test_open_empty_cloud() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("empty.xyz"), "# nothing
").unwrap();
        let mut state = state_in(dir.path());
        assert_eq!(state.open_cloud(&dir.path().join("empty.xyz")).unwrap(), 0);
        let cloud = state.cloud.as_ref().unwrap();
        assert!(cloud.is_empty());
        assert!(cloud.bounds.is_none());
    }

    #[test]
    fn test_panel_cache_recomputes_on_change() {
        use crate::annotate::{Point3, ViewTransform};
        let mut cache = PanelCache::default();
        let cloud = PointCloud::from_points(vec![Point3::new(0.0, 0.5, 0.0)]);
        let b = OrientedBox::default();
        let bounds = PanelBounds::capture(PanelView::Top, &b, (200.0, 100.0), 12.0, &ViewTransform::default());
        assert_eq!(cache.get(&bounds, &b, Some(&cloud), 10).inner.len(), 1);
        let moved = OrientedBox::new(1.0, 1.0, 1.0, Point3::new(5.0, 0.5, 0.0));
        assert_eq!(cache.get(&bounds, &moved, Some(&cloud), 10).inner.len(), 0);
        assert!(cache.get(&bounds, &moved, None, 10).outer.is_empty());
    }
}
