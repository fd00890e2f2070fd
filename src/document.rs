//! Annotation documents
//!
//! Saved as brotli-compressed pretty RON. Loading accepts both compressed and
//! plain RON, so hand-edited files work too. JSON export writes the same
//! structure for tools outside the editor.

use crate::annotate::{Annotation, AnnotationSet, OrientedBox, MIN_EXTENT};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Current on-disk format version
pub const DOCUMENT_VERSION: u32 = 1;

/// Document limits checked on load
pub mod limits {
    /// Maximum annotations per document
    pub const MAX_ANNOTATIONS: usize = 10_000;
    /// Maximum absolute center coordinate (meters)
    pub const MAX_COORD: f64 = 1_000_000.0;
    /// Maximum box extent (meters)
    pub use crate::annotate::MAX_EXTENT;
    /// Maximum id length
    pub const MAX_ID_LEN: usize = 64;
}

#[derive(Debug)]
pub enum DocumentError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Serialize(ron::Error),
    Json(serde_json::Error),
    Compression(String),
    Validation(String),
}

impl From<std::io::Error> for DocumentError {
    fn from(e: std::io::Error) -> Self {
        DocumentError::Io(e)
    }
}

impl From<ron::error::SpannedError> for DocumentError {
    fn from(e: ron::error::SpannedError) -> Self {
        DocumentError::Parse(e)
    }
}

impl From<ron::Error> for DocumentError {
    fn from(e: ron::Error) -> Self {
        DocumentError::Serialize(e)
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::Json(e)
    }
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::Io(e) => write!(f, "IO error: {}", e),
            DocumentError::Parse(e) => write!(f, "Parse error: {}", e),
            DocumentError::Serialize(e) => write!(f, "Serialize error: {}", e),
            DocumentError::Json(e) => write!(f, "JSON error: {}", e),
            DocumentError::Compression(e) => write!(f, "Compression error: {}", e),
            DocumentError::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Everything persisted for one annotated cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDocument {
    pub version: u32,
    /// Path of the point cloud these boxes belong to
    #[serde(default)]
    pub cloud: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl AnnotationDocument {
    pub fn new(cloud: Option<String>, set: &AnnotationSet) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            cloud,
            annotations: set.annotations().to_vec(),
        }
    }

    /// Rebuild an annotation set; ids continue past the highest loaded id
    pub fn to_set(&self) -> AnnotationSet {
        AnnotationSet::from_annotations(self.annotations.clone())
    }
}

fn check_value(id: &str, what: &str, v: f64, max: f64) -> Result<(), DocumentError> {
    if !v.is_finite() || v.abs() > max {
        return Err(DocumentError::Validation(format!("{}: invalid {} {}", id, what, v)));
    }
    Ok(())
}

fn validate_box(id: &str, b: &OrientedBox) -> Result<(), DocumentError> {
    for (what, v) in [("width", b.width), ("length", b.length), ("height", b.height)] {
        check_value(id, what, v, limits::MAX_EXTENT)?;
        if v < MIN_EXTENT {
            return Err(DocumentError::Validation(format!(
                "{}: {} {} below minimum {}",
                id, what, v, MIN_EXTENT
            )));
        }
    }
    for (what, v) in [("center.x", b.center.x), ("center.y", b.center.y), ("center.z", b.center.z)] {
        check_value(id, what, v, limits::MAX_COORD)?;
    }
    Ok(())
}

/// Validate a loaded document to reject corrupt or hostile files
pub fn validate_document(doc: &AnnotationDocument) -> Result<(), DocumentError> {
    if doc.version > DOCUMENT_VERSION {
        return Err(DocumentError::Validation(format!(
            "document version {} is newer than supported {}",
            doc.version, DOCUMENT_VERSION
        )));
    }
    if doc.annotations.len() > limits::MAX_ANNOTATIONS {
        return Err(DocumentError::Validation(format!(
            "too many annotations: {} (max {})",
            doc.annotations.len(),
            limits::MAX_ANNOTATIONS
        )));
    }
    let mut seen = HashSet::new();
    for a in &doc.annotations {
        if a.id.is_empty() || a.id.len() > limits::MAX_ID_LEN {
            return Err(DocumentError::Validation(format!("invalid id {:?}", a.id)));
        }
        if !seen.insert(a.id.as_str()) {
            return Err(DocumentError::Validation(format!("duplicate id {}", a.id)));
        }
        validate_box(&a.id, &a.cuboid)?;
    }
    Ok(())
}

/// Parse a document from RON text and validate it
pub fn load_document_from_str(s: &str) -> Result<AnnotationDocument, DocumentError> {
    let doc: AnnotationDocument = ron::from_str(s)?;
    validate_document(&doc)?;
    Ok(doc)
}

pub fn load_document<P: AsRef<Path>>(path: P) -> Result<AnnotationDocument, DocumentError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;

    // RON files start with '(' or whitespace, brotli is binary
    let is_plain_ron = bytes
        .first()
        .map(|&b| b == b'(' || b.is_ascii_whitespace())
        .unwrap_or(false);

    let raw = if is_plain_ron {
        bytes
    } else {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(&bytes), &mut decompressed)
            .map_err(|e| DocumentError::Compression(format!("brotli decompression failed: {}", e)))?;
        decompressed
    };
    let contents = String::from_utf8(raw).map_err(|e| {
        DocumentError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("invalid UTF-8: {}", e),
        ))
    })?;

    let doc = load_document_from_str(&contents).inspect_err(|e| {
        log::error!("Failed to load {}: {}", path.display(), e);
    })?;
    log::info!("Loaded {} annotations from {}", doc.annotations.len(), path.display());
    Ok(doc)
}

pub fn document_to_ron(doc: &AnnotationDocument) -> Result<String, DocumentError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());
    Ok(ron::ser::to_string_pretty(doc, config)?)
}

pub fn save_document<P: AsRef<Path>>(doc: &AnnotationDocument, path: P) -> Result<(), DocumentError> {
    let ron_string = document_to_ron(doc)?;

    let mut compressed = Vec::new();
    brotli::BrotliCompress(
        &mut Cursor::new(ron_string.as_bytes()),
        &mut compressed,
        &brotli::enc::BrotliEncoderParams {
            quality: 6,
            lgwin: 22,
            ..Default::default()
        },
    )
    .map_err(|e| DocumentError::Compression(format!("brotli compression failed: {}", e)))?;

    fs::write(path.as_ref(), compressed)?;
    log::info!("Saved {} annotations to {}", doc.annotations.len(), path.as_ref().display());
    Ok(())
}

/// Write the document as pretty JSON
pub fn export_json<P: AsRef<Path>>(doc: &AnnotationDocument, path: P) -> Result<(), DocumentError> {
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path.as_ref(), json)?;
    log::info!("Exported JSON to {}", path.as_ref().display());
    Ok(())
}
