//! The drawing surface: committed shapes plus all interaction state.
//!
//! The surface consumes pointer and keyboard events from whatever event
//! loop hosts it and owns everything that changes in response: the shape
//! collection, the drawing mode machine, the pending label, and the
//! idle-mode drag state. Committed-shape notifications are queued and
//! drained by the controller through [`DrawingSurface::take_events`].

mod draw;

pub use draw::{DrawEffect, DrawInput, DrawMode, DrawState, RectDraft};

use crate::geometry::{Point, Rect};
use crate::model::{PolygonShape, RectangleShape, Shape, ShapeId, ShapeStore, VERTEX_HIT_RADIUS};

/// Notification raised by the surface for the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    PolygonCommitted(ShapeId),
    RectangleCommitted(ShapeId),
    SelectionChanged,
}

/// Cursor affordance reported for the current hover position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// The pointer is over a draggable vertex handle.
    Editable,
}

/// What an external renderer should draw for the in-progress shape.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPreview<'a> {
    None,
    Polygon {
        points: &'a [Point],
        rubber_band: Option<(Point, Point)>,
    },
    Rectangle {
        rect: Rect,
    },
}

/// Idle-mode pointer drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum IdleDrag {
    #[default]
    None,
    /// Whole-shape move; `last` is the previous pointer position.
    MoveShape { id: ShapeId, last: Point },
    /// A vertex of the selected polygon follows the pointer.
    DragVertex { id: ShapeId },
}

/// Owns the committed shapes and interaction state for one open image.
#[derive(Debug, Default)]
pub struct DrawingSurface {
    store: ShapeStore,
    draw: DrawState,
    pending_label: String,
    drag: IdleDrag,
    events: Vec<SurfaceEvent>,
}

impl DrawingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the interaction mode, discarding any in-progress shape.
    pub fn set_mode(&mut self, mode: DrawMode) {
        self.drag = IdleDrag::None;
        self.draw.handle(DrawInput::SetMode(mode));
        log::debug!("surface mode set to {:?}", mode);
    }

    pub fn mode(&self) -> DrawMode {
        self.draw.mode()
    }

    /// Label stamped onto the next committed shape.
    pub fn set_pending_label(&mut self, label: impl Into<String>) {
        self.pending_label = label.into();
    }

    pub fn pending_label(&self) -> &str {
        &self.pending_label
    }

    /// Primary-button press.
    pub fn pointer_pressed(&mut self, point: Point) {
        match self.draw.handle(DrawInput::PointerDown(point)) {
            DrawEffect::Forwarded => self.idle_pressed(point),
            effect => self.apply_effect(effect),
        }
    }

    /// Pointer motion, with or without a button held.
    pub fn pointer_moved(&mut self, point: Point) {
        match self.draw.handle(DrawInput::PointerMove(point)) {
            DrawEffect::Forwarded => self.idle_moved(point),
            effect => self.apply_effect(effect),
        }
    }

    /// Primary-button release.
    pub fn pointer_released(&mut self, point: Point) {
        match self.draw.handle(DrawInput::PointerUp(point)) {
            DrawEffect::Forwarded => self.idle_released(),
            effect => self.apply_effect(effect),
        }
    }

    /// Primary-button double-click.
    pub fn double_clicked(&mut self, point: Point) {
        match self.draw.handle(DrawInput::DoubleClick(point)) {
            // A double-click in idle mode carries no extra meaning beyond
            // the presses already delivered.
            DrawEffect::Forwarded => {}
            effect => self.apply_effect(effect),
        }
    }

    /// Escape key: abort the in-progress shape and leave the drawing mode.
    pub fn escape_pressed(&mut self) {
        self.drag = IdleDrag::None;
        self.draw.handle(DrawInput::Escape);
    }

    /// Secondary-button press on a shape.
    ///
    /// Selects the shape under the pointer and hands its id back so the
    /// controller can present its relabel/delete actions; the surface
    /// itself implements no menu.
    pub fn context_clicked(&mut self, point: Point) -> Option<ShapeId> {
        let hit = self.store.hit_test(&point)?;
        if self.store.select(Some(hit)) {
            self.events.push(SurfaceEvent::SelectionChanged);
        }
        Some(hit)
    }

    /// Cursor affordance for a hover position (no button pressed).
    pub fn cursor_hint(&self, point: Point) -> CursorHint {
        let on_vertex = self.store.shapes().any(|shape| {
            shape
                .as_polygon()
                .and_then(|poly| poly.hit_test_vertex(&point, VERTEX_HIT_RADIUS))
                .is_some()
        });
        if on_vertex { CursorHint::Editable } else { CursorHint::Default }
    }

    /// Delete the selected shape. Silently does nothing without a selection.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.store.selected() else {
            return false;
        };
        self.store.remove(id);
        self.events.push(SurfaceEvent::SelectionChanged);
        log::debug!("deleted shape {}", id);
        true
    }

    /// Relabel the selected shape. Silently does nothing without a selection.
    pub fn relabel_selected(&mut self, label: &str) -> bool {
        match self.store.selected_shape_mut() {
            Some(shape) => {
                shape.set_label(label);
                true
            }
            None => false,
        }
    }

    /// Change the selection programmatically.
    pub fn select(&mut self, id: Option<ShapeId>) {
        if self.store.select(id) {
            self.events.push(SurfaceEvent::SelectionChanged);
        }
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.store.selected()
    }

    /// Drain the queued notifications.
    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    /// The in-progress shape for the renderer, if any.
    pub fn preview(&self) -> DrawPreview<'_> {
        match &self.draw {
            DrawState::Idle => DrawPreview::None,
            DrawState::Polygon { points, rubber_band } => DrawPreview::Polygon {
                points,
                rubber_band: *rubber_band,
            },
            DrawState::Rectangle { draft } => match draft {
                Some(d) => DrawPreview::Rectangle { rect: d.rect },
                None => DrawPreview::None,
            },
        }
    }

    /// Add an already-built shape, e.g. reconstructed from a sidecar file.
    ///
    /// Unlike an interactive commit this raises no event.
    pub fn insert_shape(&mut self, shape: Shape) -> ShapeId {
        self.store.insert(shape)
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.store.shapes()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.store.iter()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Destroy every shape and all interaction state (image switch).
    pub fn reset(&mut self) {
        self.store.clear();
        self.draw = DrawState::Idle;
        self.drag = IdleDrag::None;
        self.pending_label.clear();
        self.events.clear();
    }

    fn apply_effect(&mut self, effect: DrawEffect) {
        match effect {
            DrawEffect::None => {}
            DrawEffect::Forwarded => {}
            DrawEffect::PolygonCommitted(points) => {
                let shape = Shape::Polygon(PolygonShape::new(points, self.pending_label.clone()));
                let id = self.store.insert(shape);
                log::debug!("polygon {} committed with label {:?}", id, self.pending_label);
                self.events.push(SurfaceEvent::PolygonCommitted(id));
            }
            DrawEffect::RectangleCommitted(rect) => {
                let shape =
                    Shape::Rectangle(RectangleShape::new(rect, self.pending_label.clone()));
                let id = self.store.insert(shape);
                log::debug!("rectangle {} committed with label {:?}", id, self.pending_label);
                self.events.push(SurfaceEvent::RectangleCommitted(id));
            }
        }
    }

    /// Idle-mode press: vertex drag on the selected polygon, else shape
    /// selection and whole-shape move, else clear the selection.
    fn idle_pressed(&mut self, point: Point) {
        if let Some(id) = self.store.selected()
            && let Some(Shape::Polygon(poly)) = self.store.get_mut(id)
            && poly.begin_vertex_drag(&point)
        {
            self.drag = IdleDrag::DragVertex { id };
            return;
        }

        match self.store.hit_test(&point) {
            Some(hit) => {
                if self.store.select(Some(hit)) {
                    self.events.push(SurfaceEvent::SelectionChanged);
                }
                self.drag = IdleDrag::MoveShape { id: hit, last: point };
            }
            None => {
                if self.store.select(None) {
                    self.events.push(SurfaceEvent::SelectionChanged);
                }
                self.drag = IdleDrag::None;
            }
        }
    }

    fn idle_moved(&mut self, point: Point) {
        match &mut self.drag {
            IdleDrag::None => {}
            IdleDrag::MoveShape { id, last } => {
                let (dx, dy) = (point.x - last.x, point.y - last.y);
                *last = point;
                if let Some(shape) = self.store.get_mut(*id) {
                    shape.translate(dx, dy);
                }
            }
            IdleDrag::DragVertex { id } => {
                if let Some(Shape::Polygon(poly)) = self.store.get_mut(*id) {
                    poly.drag_vertex_to(point);
                }
            }
        }
    }

    fn idle_released(&mut self) {
        if let IdleDrag::DragVertex { id } = self.drag
            && let Some(Shape::Polygon(poly)) = self.store.get_mut(id)
        {
            poly.end_vertex_drag();
        }
        self.drag = IdleDrag::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_triangle(surface: &mut DrawingSurface) -> ShapeId {
        surface.set_mode(DrawMode::Polygon);
        surface.pointer_pressed(Point::new(0.0, 0.0));
        surface.pointer_pressed(Point::new(100.0, 0.0));
        surface.pointer_pressed(Point::new(100.0, 100.0));
        surface.double_clicked(Point::new(100.0, 100.0));
        match surface.take_events().as_slice() {
            [SurfaceEvent::PolygonCommitted(id)] => *id,
            other => panic!("expected a polygon commit, got {other:?}"),
        }
    }

    #[test]
    fn test_polygon_commit_stamps_pending_label() {
        let mut surface = DrawingSurface::new();
        surface.set_pending_label("cat");
        let id = draw_triangle(&mut surface);

        let shape = surface.get(id).unwrap();
        assert_eq!(shape.label(), "cat");
        let points = shape.as_polygon().unwrap().points();
        assert_eq!(
            points,
            &[Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0)]
        );
        assert_eq!(surface.mode(), DrawMode::Idle);
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn test_short_polygon_commits_nothing() {
        let mut surface = DrawingSurface::new();
        surface.set_mode(DrawMode::Polygon);
        surface.pointer_pressed(Point::new(0.0, 0.0));
        surface.pointer_pressed(Point::new(10.0, 0.0));
        surface.double_clicked(Point::new(10.0, 0.0));

        assert!(surface.is_empty());
        assert_eq!(surface.mode(), DrawMode::Polygon);
        assert!(surface.take_events().is_empty());
    }

    #[test]
    fn test_rectangle_session_commits_several() {
        let mut surface = DrawingSurface::new();
        surface.set_pending_label("box");
        surface.set_mode(DrawMode::Rectangle);

        surface.pointer_pressed(Point::new(5.0, 5.0));
        surface.pointer_moved(Point::new(2.0, 8.0));
        surface.pointer_released(Point::new(2.0, 8.0));

        surface.pointer_pressed(Point::new(20.0, 20.0));
        surface.pointer_moved(Point::new(30.0, 25.0));
        surface.pointer_released(Point::new(30.0, 25.0));

        assert_eq!(surface.mode(), DrawMode::Rectangle);
        assert_eq!(surface.len(), 2);

        let events = surface.take_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SurfaceEvent::RectangleCommitted(_)));

        let first = surface.shapes().next().unwrap();
        assert_eq!(first.label(), "box");
        assert_eq!(
            first.bounding_box().unwrap(),
            Rect { left: 2.0, top: 5.0, right: 5.0, bottom: 8.0 }
        );
    }

    #[test]
    fn test_escape_discards_rectangle_and_returns_idle() {
        let mut surface = DrawingSurface::new();
        surface.set_mode(DrawMode::Rectangle);
        surface.pointer_pressed(Point::new(5.0, 5.0));
        surface.pointer_moved(Point::new(50.0, 50.0));
        surface.escape_pressed();

        assert_eq!(surface.mode(), DrawMode::Idle);
        assert!(surface.is_empty());
        assert!(surface.take_events().is_empty());
    }

    #[test]
    fn test_idle_click_selects_and_deselects() {
        let mut surface = DrawingSurface::new();
        surface.set_pending_label("box");
        surface.set_mode(DrawMode::Rectangle);
        surface.pointer_pressed(Point::new(0.0, 0.0));
        surface.pointer_moved(Point::new(10.0, 10.0));
        surface.pointer_released(Point::new(10.0, 10.0));
        surface.set_mode(DrawMode::Idle);
        let id = match surface.take_events().as_slice() {
            [SurfaceEvent::RectangleCommitted(id)] => *id,
            other => panic!("unexpected events {other:?}"),
        };

        surface.pointer_pressed(Point::new(5.0, 5.0));
        surface.pointer_released(Point::new(5.0, 5.0));
        assert_eq!(surface.selected(), Some(id));
        assert_eq!(surface.take_events(), vec![SurfaceEvent::SelectionChanged]);

        // Clicking empty space clears the selection.
        surface.pointer_pressed(Point::new(500.0, 500.0));
        surface.pointer_released(Point::new(500.0, 500.0));
        assert_eq!(surface.selected(), None);
        assert_eq!(surface.take_events(), vec![SurfaceEvent::SelectionChanged]);
    }

    #[test]
    fn test_idle_drag_moves_whole_shape() {
        let mut surface = DrawingSurface::new();
        let id = draw_triangle(&mut surface);

        // Press inside the triangle, drag by (5, 7).
        surface.pointer_pressed(Point::new(90.0, 50.0));
        surface.pointer_moved(Point::new(95.0, 57.0));
        surface.pointer_released(Point::new(95.0, 57.0));

        let points = surface.get(id).unwrap().as_polygon().unwrap().points().to_vec();
        assert_eq!(points[0], Point::new(5.0, 7.0));
        assert_eq!(points[1], Point::new(105.0, 7.0));
        assert_eq!(points[2], Point::new(105.0, 107.0));
    }

    #[test]
    fn test_vertex_drag_requires_selection() {
        let mut surface = DrawingSurface::new();
        let id = draw_triangle(&mut surface);

        // Not selected yet: pressing near a vertex selects and moves the
        // whole shape instead of editing the vertex.
        surface.pointer_pressed(Point::new(95.0, 90.0));
        surface.pointer_moved(Point::new(96.0, 90.0));
        surface.pointer_released(Point::new(96.0, 90.0));
        let points = surface.get(id).unwrap().as_polygon().unwrap().points().to_vec();
        assert_eq!(points[0], Point::new(1.0, 0.0));

        // Now selected: pressing within the hit radius of vertex 2 drags
        // only that vertex.
        surface.pointer_pressed(Point::new(104.0, 101.0));
        surface.pointer_moved(Point::new(120.0, 130.0));
        surface.pointer_released(Point::new(120.0, 130.0));

        let points = surface.get(id).unwrap().as_polygon().unwrap().points().to_vec();
        assert_eq!(points[0], Point::new(1.0, 0.0));
        assert_eq!(points[1], Point::new(101.0, 0.0));
        assert_eq!(points[2], Point::new(120.0, 130.0));
    }

    #[test]
    fn test_committed_rectangle_moves_only() {
        // Documented limitation: committed rectangles have no corner or
        // edge handles. Polygons support vertex-level edits, rectangles
        // only whole-shape moves; dragging from a corner translates the
        // box instead of resizing it.
        let mut surface = DrawingSurface::new();
        surface.set_mode(DrawMode::Rectangle);
        surface.pointer_pressed(Point::new(10.0, 10.0));
        surface.pointer_moved(Point::new(30.0, 20.0));
        surface.pointer_released(Point::new(30.0, 20.0));
        surface.set_mode(DrawMode::Idle);
        let id = match surface.take_events().as_slice() {
            [SurfaceEvent::RectangleCommitted(id)] => *id,
            other => panic!("unexpected events {other:?}"),
        };
        surface.select(Some(id));

        // Press right on the bottom-right corner and drag outward.
        surface.pointer_pressed(Point::new(30.0, 20.0));
        surface.pointer_moved(Point::new(40.0, 30.0));
        surface.pointer_released(Point::new(40.0, 30.0));

        let rect = surface.get(id).unwrap().bounding_box().unwrap();
        assert_eq!(rect, Rect { left: 20.0, top: 20.0, right: 40.0, bottom: 30.0 });
        assert_eq!(rect.width(), 20.0);
        assert_eq!(rect.height(), 10.0);
    }

    #[test]
    fn test_delete_and_relabel_selected() {
        let mut surface = DrawingSurface::new();

        // Nothing selected: both commands are silent no-ops.
        assert!(!surface.delete_selected());
        assert!(!surface.relabel_selected("dog"));

        let id = draw_triangle(&mut surface);
        surface.select(Some(id));
        assert!(surface.relabel_selected("dog"));
        assert_eq!(surface.get(id).unwrap().label(), "dog");

        assert!(surface.delete_selected());
        assert!(surface.is_empty());
        assert_eq!(surface.selected(), None);
    }

    #[test]
    fn test_context_click_selects_shape() {
        let mut surface = DrawingSurface::new();
        let id = draw_triangle(&mut surface);
        surface.take_events();

        assert_eq!(surface.context_clicked(Point::new(90.0, 50.0)), Some(id));
        assert_eq!(surface.selected(), Some(id));
        assert_eq!(surface.take_events(), vec![SurfaceEvent::SelectionChanged]);

        assert_eq!(surface.context_clicked(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_cursor_hint_near_vertex() {
        let mut surface = DrawingSurface::new();
        draw_triangle(&mut surface);

        assert_eq!(surface.cursor_hint(Point::new(2.0, 2.0)), CursorHint::Editable);
        assert_eq!(surface.cursor_hint(Point::new(50.0, 40.0)), CursorHint::Default);
    }

    #[test]
    fn test_preview_exposes_draft() {
        let mut surface = DrawingSurface::new();
        assert_eq!(surface.preview(), DrawPreview::None);

        surface.set_mode(DrawMode::Rectangle);
        surface.pointer_pressed(Point::new(1.0, 1.0));
        surface.pointer_moved(Point::new(4.0, 6.0));
        match surface.preview() {
            DrawPreview::Rectangle { rect } => {
                assert_eq!(rect, Rect { left: 1.0, top: 1.0, right: 4.0, bottom: 6.0 });
            }
            other => panic!("unexpected preview {other:?}"),
        }

        surface.set_mode(DrawMode::Polygon);
        surface.pointer_pressed(Point::new(0.0, 0.0));
        surface.pointer_moved(Point::new(9.0, 9.0));
        match surface.preview() {
            DrawPreview::Polygon { points, rubber_band } => {
                assert_eq!(points.len(), 1);
                assert_eq!(rubber_band, Some((Point::new(0.0, 0.0), Point::new(9.0, 9.0))));
            }
            other => panic!("unexpected preview {other:?}"),
        }
    }

    #[test]
    fn test_reset_destroys_everything() {
        let mut surface = DrawingSurface::new();
        surface.set_pending_label("cat");
        draw_triangle(&mut surface);
        surface.set_mode(DrawMode::Rectangle);
        surface.pointer_pressed(Point::new(0.0, 0.0));

        surface.reset();
        assert!(surface.is_empty());
        assert_eq!(surface.mode(), DrawMode::Idle);
        assert_eq!(surface.pending_label(), "");
        assert!(surface.take_events().is_empty());
        assert_eq!(surface.preview(), DrawPreview::None);
    }
}
