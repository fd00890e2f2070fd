//! Editor Session
//!
//! Owns everything the editor mutates: the annotation set with its focus
//! pointer, the single in-flight drag, per-panel zoom/pan, and the drawn box
//! awaiting kind confirmation. All writes to a box go through here, so a drag
//! holds exclusive write access until pointer-up.

use super::annotation::{AnnotationSet, ObjectKind};
use super::classify::suggest_for;
use super::cuboid::{BoxPatch, OrientedBox};
use super::drag::{
    ActiveDrag, DragManager, DrawTracker, GroundMoveTracker, MoveTracker, PanTracker, Pointer,
    ResizeTracker,
};
use super::geometry::Point3;
use super::projection::{Edge, PanelBounds, PanelHit, PanelView, ViewTransform};

/// Tunables the session needs from the editor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    /// Inner pixel pad of projection panels
    pub panel_pad: f64,
    /// Height given to freshly drawn boxes (meters)
    pub default_box_height: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            panel_pad: 12.0,
            default_box_height: 1.5,
        }
    }
}

/// A drawn box waiting for the user to confirm its kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingDraw {
    pub cuboid: OrientedBox,
    pub suggested: ObjectKind,
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    annotations: AnnotationSet,
    drag: DragManager,
    views: [ViewTransform; 3],
    pending: Option<PendingDraw>,
    settings: SessionSettings,
    /// Bumped on every committed change to the annotations
    revision: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl EditorSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            annotations: AnnotationSet::new(),
            drag: DragManager::new(),
            views: [ViewTransform::default(); 3],
            pending: None,
            settings,
            revision: 0,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Replace all annotations (e.g. after loading a document)
    pub fn replace_annotations(&mut self, annotations: AnnotationSet) {
        self.drag.finish();
        self.pending = None;
        self.annotations = annotations;
        self.bump();
    }

    // ------------------------------------------------------------------
    // Focus and attributes
    // ------------------------------------------------------------------

    pub fn focused_box(&self) -> Option<OrientedBox> {
        self.annotations.focused().map(|a| a.cuboid)
    }

    /// Focus an annotation. Refused while a drag is in flight.
    pub fn focus(&mut self, id: Option<&str>) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        self.annotations.focus(id);
        true
    }

    pub fn focus_next(&mut self) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        self.annotations.focus_next();
        true
    }

    /// Focus the topmost annotation whose footprint contains a ground point.
    /// Returns whether anything was hit; a miss leaves the focus alone.
    pub fn pick_ground(&mut self, x: f64, z: f64) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let Some(id) = self.annotations.pick_footprint(x, z).map(|a| a.id.clone()) else {
            return false;
        };
        self.annotations.focus(Some(&id));
        true
    }

    /// Delete the focused annotation, returning its id
    pub fn delete_focused(&mut self) -> Option<String> {
        if self.drag.is_dragging() {
            return None;
        }
        let id = self.annotations.focused_id()?.to_string();
        self.annotations.remove(&id)?;
        log::info!("Deleted annotation {}", id);
        self.bump();
        Some(id)
    }

    pub fn set_kind(&mut self, id: &str, kind: ObjectKind) -> bool {
        let Some(a) = self.annotations.get_mut(id) else {
            return false;
        };
        if a.kind != kind {
            a.kind = kind;
            self.bump();
        }
        true
    }

    pub fn toggle_group(&mut self, id: &str) -> bool {
        let Some(a) = self.annotations.get_mut(id) else {
            return false;
        };
        a.group = !a.group;
        self.bump();
        true
    }

    pub fn toggle_ghost(&mut self, id: &str) -> bool {
        let Some(a) = self.annotations.get_mut(id) else {
            return false;
        };
        a.ghost = !a.ghost;
        self.bump();
        true
    }

    /// Write to the focused box from outside a drag (numeric fields).
    ///
    /// Returns false, leaving the box unchanged, while a drag is in flight or
    /// nothing is focused.
    pub fn set_focused_box(&mut self, patch: BoxPatch, center: Option<Point3>) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let Some(a) = self.annotations.focused_mut() else {
            return false;
        };
        let before = a.cuboid;
        a.cuboid.set_box(patch, center);
        if a.cuboid != before {
            self.bump();
        }
        true
    }

    /// Commit a box computed by a drag to its target annotation
    fn commit(&mut self, target: Option<&str>, cuboid: OrientedBox) {
        let Some(a) = target.and_then(|id| self.annotations.get_mut(id)) else {
            return;
        };
        if a.cuboid != cuboid {
            a.cuboid = cuboid;
            self.bump();
        }
    }

    // ------------------------------------------------------------------
    // Panel views
    // ------------------------------------------------------------------

    pub fn view(&self, panel: PanelView) -> &ViewTransform {
        &self.views[panel.index()]
    }

    /// Apply a wheel notch to a panel's zoom
    pub fn zoom(&mut self, panel: PanelView, scroll: f64) {
        self.views[panel.index()].zoom_notch(scroll);
    }

    pub fn reset_view(&mut self, panel: PanelView) {
        self.views[panel.index()].reset();
    }

    /// Current mapping for a panel of the given canvas size.
    ///
    /// During a drag owned by that panel, this is the snapshot captured at
    /// drag start (with the live pan for pan drags).
    pub fn panel_bounds(&self, panel: PanelView, canvas: (f64, f64)) -> Option<PanelBounds> {
        match &self.drag.active {
            ActiveDrag::Resize(t) if t.bounds.view == panel => return Some(t.bounds),
            ActiveDrag::Move(t) if t.bounds.view == panel => return Some(t.bounds),
            _ => {}
        }
        let cuboid = self.focused_box()?;
        Some(PanelBounds::capture(panel, &cuboid, canvas, self.settings.panel_pad, self.view(panel)))
    }

    /// Classify a panel pixel against the focused box
    pub fn hit_test(&self, panel: PanelView, canvas: (f64, f64), px: (f64, f64), near: f64) -> PanelHit {
        let (Some(bounds), Some(cuboid)) = (self.panel_bounds(panel, canvas), self.focused_box()) else {
            return PanelHit::Outside;
        };
        bounds.box_rect(&cuboid).hit_test(px.0, px.1, near)
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn active_drag(&self) -> &ActiveDrag {
        &self.drag.active
    }

    /// Box to draw for the current gesture: the uncommitted resize/draw
    /// preview if there is one
    pub fn preview_box(&self) -> Option<OrientedBox> {
        self.drag.preview
    }

    /// Start dragging one edge of the focused box in a panel
    pub fn begin_resize(&mut self, panel: PanelView, edge: Edge, canvas: (f64, f64)) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let (Some(id), Some(cuboid)) = (self.annotations.focused_id().map(str::to_string), self.focused_box()) else {
            return false;
        };
        let bounds = PanelBounds::capture(panel, &cuboid, canvas, self.settings.panel_pad, self.view(panel));
        log::debug!("Resize {:?} edge in {:?} panel of {}", edge, panel, id);
        self.drag.start(ActiveDrag::Resize(ResizeTracker::new(edge, bounds, cuboid)), Some(id))
    }

    /// Start moving the focused box inside a panel
    pub fn begin_panel_move(&mut self, panel: PanelView, canvas: (f64, f64), px: (f64, f64)) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let (Some(id), Some(cuboid)) = (self.annotations.focused_id().map(str::to_string), self.focused_box()) else {
            return false;
        };
        let bounds = PanelBounds::capture(panel, &cuboid, canvas, self.settings.panel_pad, self.view(panel));
        self.drag.start(ActiveDrag::Move(MoveTracker::new(bounds, cuboid, px)), Some(id))
    }

    /// Start panning a panel's view
    pub fn begin_pan(&mut self, panel: PanelView, px: (f64, f64)) -> bool {
        let tracker = PanTracker::new(px, self.view(panel).pan);
        self.drag.start(ActiveDrag::Pan { panel, tracker }, None)
    }

    /// Start drawing a new box on the ground. Refused while a drawn box is
    /// still waiting for confirmation.
    pub fn begin_draw(&mut self, ground: (f64, f64)) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let tracker = DrawTracker::new(ground, self.settings.default_box_height);
        self.drag.start(ActiveDrag::Draw(tracker), None)
    }

    /// Start moving the focused box across the ground. Only starts when the
    /// pointer is inside the focused box's footprint.
    pub fn begin_ground_move(&mut self, ground: (f64, f64)) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let (Some(id), Some(cuboid)) = (self.annotations.focused_id().map(str::to_string), self.focused_box()) else {
            return false;
        };
        if !cuboid.footprint_contains(ground.0, ground.1) {
            return false;
        }
        self.drag.start(ActiveDrag::GroundMove(GroundMoveTracker::new(cuboid, ground)), Some(id))
    }

    /// Feed a pointer-move to the active drag.
    ///
    /// Moves and pans apply immediately; resize and draw only update the
    /// preview. A pointer of the wrong kind for the active drag is ignored.
    pub fn update_drag(&mut self, pointer: Pointer) {
        let target = self.drag.target.clone();
        match (&mut self.drag.active, pointer) {
            (ActiveDrag::Resize(t), Pointer::Panel { x, y }) => {
                self.drag.preview = Some(t.resize_at_pixel((x, y)));
            }
            (ActiveDrag::Move(t), Pointer::Panel { x, y }) => {
                let next = t.moved_to((x, y));
                self.commit(target.as_deref(), next);
            }
            (ActiveDrag::Pan { panel, tracker }, Pointer::Panel { x, y }) => {
                let pan = tracker.pan_at((x, y));
                self.views[panel.index()].pan = pan;
            }
            (ActiveDrag::Draw(t), Pointer::Ground { x, z }) => {
                t.current = (x, z);
                self.drag.preview = Some(t.preview());
            }
            (ActiveDrag::GroundMove(t), Pointer::Ground { x, z }) => {
                let next = t.moved_to((x, z));
                self.commit(target.as_deref(), next);
            }
            _ => {}
        }
    }

    /// Pointer-up: commit the active drag.
    ///
    /// Returns the committed box for box-editing gestures, the drawn box for
    /// draw gestures (which then waits in `pending`), and None for pans or
    /// when nothing was dragging. A pointer of the wrong kind commits the
    /// drag at its last known state.
    pub fn end_drag(&mut self, pointer: Pointer) -> Option<OrientedBox> {
        let preview = self.drag.preview;
        let (drag, target) = self.drag.finish();
        let committed = match (drag, pointer) {
            (ActiveDrag::None, _) => return None,
            (ActiveDrag::Pan { panel, tracker }, p) => {
                if let Pointer::Panel { x, y } = p {
                    self.views[panel.index()].pan = tracker.pan_at((x, y));
                }
                return None;
            }
            (ActiveDrag::Draw(t), p) => {
                let cuboid = match p {
                    Pointer::Ground { x, z } => t.box_to((x, z)),
                    Pointer::Panel { .. } => t.preview(),
                };
                let suggested = suggest_for(&cuboid);
                log::info!(
                    "Drew box {:.3} x {:.3} x {:.3}, suggested {}",
                    cuboid.width, cuboid.length, cuboid.height, suggested
                );
                self.pending = Some(PendingDraw { cuboid, suggested });
                return Some(cuboid);
            }
            (ActiveDrag::Resize(t), Pointer::Panel { x, y }) => Some(t.resize_at_pixel((x, y))),
            (ActiveDrag::Resize(t), _) => Some(preview.unwrap_or(t.start_box)),
            (ActiveDrag::Move(t), Pointer::Panel { x, y }) => Some(t.moved_to((x, y))),
            (ActiveDrag::GroundMove(t), Pointer::Ground { x, z }) => Some(t.moved_to((x, z))),
            // Moves already committed on their last update
            (ActiveDrag::Move(_), _) | (ActiveDrag::GroundMove(_), _) => None,
        };
        if let Some(next) = committed {
            self.commit(target.as_deref(), next);
        }
        target
            .and_then(|id| self.annotations.get(&id))
            .map(|a| a.cuboid)
    }

    // ------------------------------------------------------------------
    // Draw confirmation
    // ------------------------------------------------------------------

    pub fn pending(&self) -> Option<&PendingDraw> {
        self.pending.as_ref()
    }

    /// Turn the pending box into an annotation of the chosen kind and focus it
    pub fn confirm_pending(&mut self, kind: ObjectKind) -> Option<String> {
        let pending = self.pending.take()?;
        let id = self.annotations.add(kind, pending.cuboid);
        self.annotations.focus(Some(&id));
        if kind != pending.suggested {
            log::info!("Created {} as {} (suggested {})", id, kind, pending.suggested);
        } else {
            log::info!("Created {} as {}", id, kind);
        }
        self.bump();
        Some(id)
    }

    /// Drop the pending box without creating an annotation
    pub fn discard_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::geometry::Dimension;

    const CANVAS: (f64, f64) = (260.0, 160.0);

    fn session_with_box(cuboid: OrientedBox) -> (EditorSession, String) {
        let mut s = EditorSession::default();
        s.begin_draw((0.0, 0.0));
        s.end_drag(Pointer::Ground { x: 1.0, z: 1.0 });
        let id = s.confirm_pending(ObjectKind::Car).unwrap();
        s.set_focused_box(
            BoxPatch::new()
                .with(Dimension::Width, cuboid.width)
                .with(Dimension::Length, cuboid.length)
                .with(Dimension::Height, cuboid.height),
            Some(cuboid.center),
        );
        (s, id)
    }

    fn pixel_a(s: &EditorSession, panel: PanelView, world: f64) -> f64 {
        s.panel_bounds(panel, CANVAS).unwrap().a.to_pixel(world)
    }

    #[test]
    fn test_scenario_top_left_edge() {
        let (mut s, _) = session_with_box(OrientedBox::new(1.0, 1.0, 1.0, Point3::new(0.0, 0.5, 0.0)));
        let px = pixel_a(&s, PanelView::Top, -2.0);
        assert!(s.begin_resize(PanelView::Top, Edge::Left, CANVAS));
        s.update_drag(Pointer::Panel { x: px, y: 80.0 });
        // Preview only until pointer-up
        assert_eq!(s.focused_box().unwrap().width, 1.0);
        assert_eq!(s.preview_box().unwrap().width, 2.5);

        let committed = s.end_drag(Pointer::Panel { x: px, y: 80.0 }).unwrap();
        let b = s.focused_box().unwrap();
        assert_eq!(committed, b);
        assert_eq!(b.width, 2.5);
        assert_eq!(b.center, Point3::new(-0.75, 0.5, 0.0));
        assert!(s.preview_box().is_none());
    }

    #[test]
    fn test_bounds_frozen_during_drag() {
        let (mut s, _) = session_with_box(OrientedBox::default());
        let before = s.panel_bounds(PanelView::Front, CANVAS).unwrap();
        s.begin_panel_move(PanelView::Front, CANVAS, (130.0, 80.0));
        s.update_drag(Pointer::Panel { x: 135.0, y: 80.0 });
        assert_ne!(s.focused_box().unwrap().center.x, 0.0);
        assert_eq!(s.panel_bounds(PanelView::Front, CANVAS).unwrap(), before);
        s.end_drag(Pointer::Panel { x: 135.0, y: 80.0 });
        assert_ne!(s.panel_bounds(PanelView::Front, CANVAS).unwrap(), before);
    }

    #[test]
    fn test_writes_refused_during_drag() {
        let (mut s, _) = session_with_box(OrientedBox::default());
        assert!(s.begin_resize(PanelView::Side, Edge::Right, CANVAS));
        assert!(!s.set_focused_box(BoxPatch::single(Dimension::Height, 3.0), None));
        assert!(!s.begin_pan(PanelView::Top, (0.0, 0.0)));
        assert!(!s.begin_draw((0.0, 0.0)));
        assert!(!s.focus(None));
        assert!(s.delete_focused().is_none());
        assert_eq!(s.focused_box().unwrap().height, 1.0);
        s.end_drag(Pointer::Panel { x: 0.0, y: 0.0 });
        assert!(s.set_focused_box(BoxPatch::single(Dimension::Height, 3.0), None));
        assert_eq!(s.focused_box().unwrap().height, 3.0);
    }

    #[test]
    fn test_draw_then_confirm_with_override() {
        let mut s = EditorSession::default();
        assert!(s.begin_draw((0.0, 0.0)));
        s.update_drag(Pointer::Ground { x: 1.0, z: 2.0 });
        assert!(s.preview_box().is_some());
        s.end_drag(Pointer::Ground { x: 1.8, z: 4.2 });

        let pending = *s.pending().unwrap();
        assert_eq!((pending.cuboid.width, pending.cuboid.length, pending.cuboid.height), (1.8, 4.2, 1.5));
        assert_eq!(pending.suggested, ObjectKind::Car);
        assert!(s.annotations().is_empty());

        // A second draw waits for the first to be resolved
        assert!(!s.begin_draw((5.0, 5.0)));

        let id = s.confirm_pending(ObjectKind::Truck).unwrap();
        assert_eq!(s.annotations().get(&id).unwrap().kind, ObjectKind::Truck);
        assert_eq!(s.annotations().focused_id(), Some(id.as_str()));
        assert!(s.pending().is_none());
    }

    #[test]
    fn test_discard_pending() {
        let mut s = EditorSession::default();
        s.begin_draw((0.0, 0.0));
        s.end_drag(Pointer::Ground { x: 0.4, z: 0.4 });
        assert!(s.discard_pending());
        assert!(!s.discard_pending());
        assert!(s.annotations().is_empty());
    }

    #[test]
    fn test_ground_move_requires_footprint_hit() {
        let (mut s, _) = session_with_box(OrientedBox::new(2.0, 2.0, 1.0, Point3::new(0.0, 0.5, 0.0)));
        assert!(!s.begin_ground_move((5.0, 5.0)));
        assert!(s.begin_ground_move((0.5, 0.5)));
        s.update_drag(Pointer::Ground { x: 1.5, z: -0.5 });
        assert_eq!(s.focused_box().unwrap().center, Point3::new(1.0, 0.5, -1.0));
        s.end_drag(Pointer::Ground { x: 2.5, z: 0.5 });
        assert_eq!(s.focused_box().unwrap().center, Point3::new(2.0, 0.5, 0.0));
    }

    #[test]
    fn test_pan_updates_view_only() {
        let (mut s, _) = session_with_box(OrientedBox::default());
        let before = s.focused_box();
        assert!(s.begin_pan(PanelView::Side, (10.0, 10.0)));
        s.update_drag(Pointer::Panel { x: 30.0, y: 5.0 });
        assert_eq!(s.view(PanelView::Side).pan, (20.0, -5.0));
        assert_eq!(s.end_drag(Pointer::Panel { x: 40.0, y: 5.0 }), None);
        assert_eq!(s.view(PanelView::Side).pan, (30.0, -5.0));
        assert_eq!(s.view(PanelView::Top).pan, (0.0, 0.0));
        assert_eq!(s.focused_box(), before);
    }

    #[test]
    fn test_resize_commits_on_release_after_zoom() {
        let (mut s, _) = session_with_box(OrientedBox::new(2.0, 1.0, 1.0, Point3::new(0.0, 0.5, 0.0)));
        s.zoom(PanelView::Top, 1.0);
        s.zoom(PanelView::Top, 1.0);
        let px = pixel_a(&s, PanelView::Top, 3.0);
        s.begin_resize(PanelView::Top, Edge::Right, CANVAS);
        // Zooming mid-drag must not disturb the captured mapping
        s.zoom(PanelView::Top, 1.0);
        s.end_drag(Pointer::Panel { x: px, y: 0.0 });
        let b = s.focused_box().unwrap();
        assert_eq!(b.width, 4.0);
        assert_eq!(b.center.x, 1.0);
    }

    #[test]
    fn test_revision_tracks_commits() {
        let (mut s, id) = session_with_box(OrientedBox::default());
        let r0 = s.revision();
        s.set_focused_box(BoxPatch::single(Dimension::Width, 1.0), None);
        assert_eq!(s.revision(), r0);
        s.set_focused_box(BoxPatch::single(Dimension::Width, 2.0), None);
        assert_eq!(s.revision(), r0 + 1);
        s.toggle_ghost(&id);
        assert!(s.annotations().get(&id).unwrap().ghost);
        assert_eq!(s.revision(), r0 + 2);
    }

    #[test]
    fn test_pick_ground_focuses_hit() {
        let (mut s, first) = session_with_box(OrientedBox::new(2.0, 2.0, 1.0, Point3::new(0.0, 0.5, 0.0)));
        s.begin_draw((10.0, 10.0));
        s.end_drag(Pointer::Ground { x: 12.0, z: 12.0 });
        let second = s.confirm_pending(ObjectKind::Car).unwrap();
        assert_eq!(s.annotations().focused_id(), Some(second.as_str()));
        assert!(s.pick_ground(0.5, -0.5));
        assert_eq!(s.annotations().focused_id(), Some(first.as_str()));
        assert!(!s.pick_ground(50.0, 50.0));
        assert_eq!(s.annotations().focused_id(), Some(first.as_str()));
    }

    #[test]
    fn test_delete_focused() {
        let (mut s, id) = session_with_box(OrientedBox::default());
        assert_eq!(s.delete_focused(), Some(id));
        assert!(s.focused_box().is_none());
        assert!(!s.begin_resize(PanelView::Top, Edge::Left, CANVAS));
    }

    #[test]
    fn test_hit_test_uses_focused_box() {
        let (s, _) = session_with_box(OrientedBox::default());
        let bounds = s.panel_bounds(PanelView::Top, CANVAS).unwrap();
        let rect = bounds.box_rect(&s.focused_box().unwrap());
        let mid_y = (rect.y0 + rect.y1) * 0.5;
        assert_eq!(s.hit_test(PanelView::Top, CANVAS, (rect.x0 + 1.0, mid_y), 6.0), PanelHit::Edge(Edge::Left));
        assert_eq!(s.hit_test(PanelView::Top, CANVAS, ((rect.x0 + rect.x1) * 0.5, mid_y), 6.0), PanelHit::Inside);
        assert_eq!(EditorSession::default().hit_test(PanelView::Top, CANVAS, (0.0, 0.0), 6.0), PanelHit::Outside);
    }
}
