//! Annotations and the annotation set
//!
//! Each annotation exclusively owns one box. The set tracks which
//! annotation (if any) is focused for editing.

use serde::{Deserialize, Serialize};
use super::cuboid::OrientedBox;

/// Semantic label of an annotated object (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectKind {
    #[default]
    Car,
    Truck,
    Pedestrian,
    Cone,
    TwoWheeler,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Car,
        ObjectKind::Truck,
        ObjectKind::Pedestrian,
        ObjectKind::Cone,
        ObjectKind::TwoWheeler,
    ];

    /// Stable string form used in files and the UI
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Car => "car",
            ObjectKind::Truck => "truck",
            ObjectKind::Pedestrian => "pedestrian",
            ObjectKind::Cone => "cone",
            ObjectKind::TwoWheeler => "two-wheeler",
        }
    }

    /// Next kind in display order (wraps)
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labelled object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Identifier, `T<n>`
    pub id: String,
    pub kind: ObjectKind,
    /// Box covers a crowd/cluster rather than a single object
    #[serde(default)]
    pub group: bool,
    /// Object is a reflection or duplicate artefact
    #[serde(default)]
    pub ghost: bool,
    #[serde(rename = "box")]
    pub cuboid: OrientedBox,
}

impl Annotation {
    pub fn new(id: impl Into<String>, kind: ObjectKind, cuboid: OrientedBox) -> Self {
        Self {
            id: id.into(),
            kind,
            group: false,
            ghost: false,
            cuboid,
        }
    }

    /// Numeric part of a `T<n>` id
    pub fn id_number(&self) -> Option<u32> {
        self.id.strip_prefix('T')?.parse().ok()
    }
}

/// Ordered annotations plus the focus pointer
#[derive(Debug, Clone)]
pub struct AnnotationSet {
    items: Vec<Annotation>,
    next_id: u32,
    focused: Option<String>,
}

impl Default for AnnotationSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            focused: None,
        }
    }

    /// Rebuild from loaded annotations; the id counter continues past the highest `T<n>`
    pub fn from_annotations(items: Vec<Annotation>) -> Self {
        let next_id = items
            .iter()
            .filter_map(Annotation::id_number)
            .max()
            .map_or(1, |n| n + 1);
        Self {
            items,
            next_id,
            focused: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.items
    }

    /// Add a new annotation with a freshly allocated id; returns the id
    pub fn add(&mut self, kind: ObjectKind, cuboid: OrientedBox) -> String {
        let id = format!("T{}", self.next_id);
        self.next_id += 1;
        self.items.push(Annotation::new(id.clone(), kind, cuboid));
        id
    }

    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.items.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Annotation> {
        self.items.iter_mut().find(|a| a.id == id)
    }

    /// Remove an annotation; clears the focus if it pointed at it
    pub fn remove(&mut self, id: &str) -> Option<Annotation> {
        let idx = self.items.iter().position(|a| a.id == id)?;
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
        Some(self.items.remove(idx))
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Focus an annotation by id; unknown ids clear the focus
    pub fn focus(&mut self, id: Option<&str>) {
        self.focused = id.filter(|id| self.get(id).is_some()).map(str::to_string);
    }

    pub fn focused(&self) -> Option<&Annotation> {
        self.focused.as_deref().and_then(|id| self.get(id))
    }

    pub fn focused_mut(&mut self) -> Option<&mut Annotation> {
        let id = self.focused.clone()?;
        self.get_mut(&id)
    }

    /// Move focus to the annotation after the focused one (wraps)
    pub fn focus_next(&mut self) {
        if self.items.is_empty() {
            self.focused = None;
            return;
        }
        let next = match self.focused.as_deref().and_then(|id| self.items.iter().position(|a| a.id == id)) {
            Some(idx) => (idx + 1) % self.items.len(),
            None => 0,
        };
        self.focused = Some(self.items[next].id.clone());
    }

    /// Topmost annotation whose ground footprint contains (x, z)
    pub fn pick_footprint(&self, x: f64, z: f64) -> Option<&Annotation> {
        self.items.iter().rev().find(|a| a.cuboid.footprint_contains(x, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings_round_trip() {
        for kind in ObjectKind::ALL {
            let json = format!("\"{}\"", kind.as_str());
            assert_eq!(serde_json::from_str::<ObjectKind>(&json).unwrap(), kind);
        }
        assert!(serde_json::from_str::<ObjectKind>("\"bus\"").is_err());
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ObjectKind::TwoWheeler).unwrap();
        assert_eq!(json, "\"two-wheeler\"");
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut set = AnnotationSet::new();
        let a = set.add(ObjectKind::Car, OrientedBox::default());
        let b = set.add(ObjectKind::Truck, OrientedBox::default());
        set.remove(&a);
        let c = set.add(ObjectKind::Cone, OrientedBox::default());
        assert_eq!((a.as_str(), b.as_str(), c.as_str()), ("T1", "T2", "T3"));
    }

    #[test]
    fn test_remove_clears_focus() {
        let mut set = AnnotationSet::new();
        let a = set.add(ObjectKind::Car, OrientedBox::default());
        let b = set.add(ObjectKind::Car, OrientedBox::default());
        set.focus(Some(&a));
        set.remove(&b);
        assert_eq!(set.focused_id(), Some(a.as_str()));
        set.remove(&a);
        assert_eq!(set.focused_id(), None);
    }

    #[test]
    fn test_focus_unknown_id_clears() {
        let mut set = AnnotationSet::new();
        let a = set.add(ObjectKind::Car, OrientedBox::default());
        set.focus(Some(&a));
        set.focus(Some("T99"));
        assert!(set.focused().is_none());
    }

    #[test]
    fn test_focus_next_wraps() {
        let mut set = AnnotationSet::new();
        let a = set.add(ObjectKind::Car, OrientedBox::default());
        let b = set.add(ObjectKind::Car, OrientedBox::default());
        set.focus_next();
        assert_eq!(set.focused_id(), Some(a.as_str()));
        set.focus_next();
        assert_eq!(set.focused_id(), Some(b.as_str()));
        set.focus_next();
        assert_eq!(set.focused_id(), Some(a.as_str()));
    }

    #[test]
    fn test_from_annotations_continues_ids() {
        let items = vec![
            Annotation::new("T4", ObjectKind::Car, OrientedBox::default()),
            Annotation::new("custom", ObjectKind::Cone, OrientedBox::default()),
            Annotation::new("T2", ObjectKind::Truck, OrientedBox::default()),
        ];
        let mut set = AnnotationSet::from_annotations(items);
        assert_eq!(set.add(ObjectKind::Car, OrientedBox::default()), "T5");
    }
}
