//! User configuration
//!
//! Stored as RON under the platform config directory. A missing file means
//! defaults; a broken one is reported and replaced by defaults in memory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Inner pixel pad of the projection panels
    pub panel_pad: f32,
    /// Edge hover tolerance (pixels)
    pub edge_tolerance: f32,
    /// Height of freshly drawn boxes (meters)
    pub default_box_height: f64,
    /// Initial bird's-eye zoom (pixels per meter)
    pub ground_zoom: f32,
    /// Clouds are recorded Z-up and get rolled into the Y-up editor frame
    pub z_up_source: bool,
    pub point_size: f32,
    /// Points sampled per panel per frame
    pub max_panel_points: usize,
    /// Last document saved or opened
    pub last_document: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            panel_pad: 12.0,
            edge_tolerance: 6.0,
            default_box_height: 1.5,
            ground_zoom: 40.0,
            z_up_source: true,
            point_size: 2.0,
            max_panel_points: 200_000,
            last_document: None,
        }
    }
}

impl EditorConfig {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cuboid-annotator")
            .join("config.ron")
    }

    /// Read a config file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let mut config: EditorConfig = ron::from_str(&contents)?;
        config.sanitize();
        Ok(config)
    }

    /// Like `load`, but errors are logged and replaced by defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let pretty = ron::ser::PrettyConfig::new().indentor("  ".to_string());
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Pull out-of-range values back to something usable
    fn sanitize(&mut self) {
        let defaults = Self::default();
        if !(self.panel_pad.is_finite() && self.panel_pad >= 0.0) {
            self.panel_pad = defaults.panel_pad;
        }
        if !(self.edge_tolerance.is_finite() && self.edge_tolerance > 0.0) {
            self.edge_tolerance = defaults.edge_tolerance;
        }
        if !(self.default_box_height.is_finite() && self.default_box_height > 0.0) {
            self.default_box_height = defaults.default_box_height;
        }
        if !(self.ground_zoom.is_finite() && self.ground_zoom > 0.0) {
            self.ground_zoom = defaults.ground_zoom;
        }
        if !(self.point_size.is_finite() && self.point_size > 0.0) {
            self.point_size = defaults.point_size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(&dir.path().join("nope.ron")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(panel_pad: 20.0, z_up_source: false)").unwrap();
        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.panel_pad, 20.0);
        assert!(!config.z_up_source);
        assert_eq!(config.edge_tolerance, 6.0);
        assert_eq!(config.max_panel_points, 200_000);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(panel_pad: \"wide\"").unwrap();
        assert!(matches!(EditorConfig::load(&path), Err(ConfigError::Parse(_))));
        assert_eq!(EditorConfig::load_or_default(&path), EditorConfig::default());
    }

    #[test]
    fn test_invalid_values_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(default_box_height: -2.0, edge_tolerance: 0.0)").unwrap();
        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.default_box_height, 1.5);
        assert_eq!(config.edge_tolerance, 6.0);
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ron");
        let config = EditorConfig {
            last_document: Some("/tmp/scene.ron".into()),
            ..EditorConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(EditorConfig::load(&path).unwrap(), config);
    }
}
