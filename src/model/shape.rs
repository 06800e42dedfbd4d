//! Shape entities: the two committed region kinds and their editing contracts.

use crate::geometry::{self, Point, Rect};

/// Unique identifier for a committed shape.
pub type ShapeId = u32;

/// Minimum number of vertices required to commit a polygon interactively.
///
/// Loaded annotation files are trusted and may carry fewer.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Hit radius for vertex handles (in image pixels).
pub const VERTEX_HIT_RADIUS: f64 = 6.0;

/// A labeled polygon region.
///
/// The vertex order defines the edges, closing implicitly from the last
/// point back to the first. After commit the vertex count is fixed; the
/// only allowed geometry edit besides whole-shape moves is replacing one
/// vertex at a time through the drag protocol below.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    points: Vec<Point>,
    label: String,
    /// Index of the vertex currently following the pointer, if any.
    dragging_vertex: Option<usize>,
}

impl PolygonShape {
    pub fn new(points: Vec<Point>, label: impl Into<String>) -> Self {
        Self {
            points,
            label: label.into(),
            dragging_vertex: None,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Find the first vertex within `radius` of `point`.
    ///
    /// The lowest index wins when several vertices are in range.
    pub fn hit_test_vertex(&self, point: &Point, radius: f64) -> Option<usize> {
        self.points
            .iter()
            .position(|v| v.distance_to(point) <= radius)
    }

    /// Start dragging the vertex under `point`, if any.
    ///
    /// Returns whether a drag started. The caller is responsible for only
    /// invoking this on the selected polygon; without a vertex hit the
    /// press falls through to whole-shape movement.
    pub fn begin_vertex_drag(&mut self, point: &Point) -> bool {
        self.dragging_vertex = self.hit_test_vertex(point, VERTEX_HIT_RADIUS);
        self.dragging_vertex.is_some()
    }

    /// Move the dragged vertex to `point`. No-op when no drag is active.
    pub fn drag_vertex_to(&mut self, point: Point) {
        if let Some(index) = self.dragging_vertex {
            self.points[index] = point;
        }
    }

    /// End the active vertex drag. Idempotent.
    pub fn end_vertex_drag(&mut self) {
        self.dragging_vertex = None;
    }

    pub fn dragging_vertex(&self) -> Option<usize> {
        self.dragging_vertex
    }

    /// Check if a point is inside the polygon.
    pub fn contains(&self, point: &Point) -> bool {
        geometry::point_in_polygon(point, &self.points)
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        geometry::bounding_rect(&self.points)
    }

    /// Shift every vertex by the given delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
    }
}

/// A labeled axis-aligned rectangle region.
///
/// The stored rectangle is always in normalized corner form; resizing
/// re-normalizes, so a drag past the anchor flips cleanly. Committed
/// rectangles support whole-shape moves only, no per-corner editing.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleShape {
    rect: Rect,
    label: String,
}

impl RectangleShape {
    /// Wrap an already-normalized rectangle (e.g. loaded from a file).
    pub fn new(rect: Rect, label: impl Into<String>) -> Self {
        Self {
            rect,
            label: label.into(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Recompute the rectangle as the normalized span of `anchor` and `point`.
    ///
    /// Used both for the live preview while dragging and for the final
    /// committed geometry.
    pub fn resize_to(&mut self, anchor: Point, point: Point) {
        self.rect = Rect::from_corners(anchor, point);
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.rect.contains(point)
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        Some(self.rect)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.rect.translate(dx, dy);
    }
}

/// A committed region shape.
///
/// Closed set of variants: adding a shape kind extends every match below
/// rather than introducing a runtime type check.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(PolygonShape),
    Rectangle(RectangleShape),
}

impl Shape {
    pub fn label(&self) -> &str {
        match self {
            Shape::Polygon(p) => p.label(),
            Shape::Rectangle(r) => r.label(),
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        match self {
            Shape::Polygon(p) => p.set_label(label),
            Shape::Rectangle(r) => r.set_label(label),
        }
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            Shape::Polygon(p) => p.bounding_box(),
            Shape::Rectangle(r) => r.bounding_box(),
        }
    }

    /// Check if a point is inside this shape.
    pub fn contains(&self, point: &Point) -> bool {
        match self {
            Shape::Polygon(p) => p.contains(point),
            Shape::Rectangle(r) => r.contains(point),
        }
    }

    /// Shift the whole shape by the given delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Polygon(p) => p.translate(dx, dy),
            Shape::Rectangle(r) => r.translate(dx, dy),
        }
    }

    pub fn as_polygon(&self) -> Option<&PolygonShape> {
        match self {
            Shape::Polygon(p) => Some(p),
            Shape::Rectangle(_) => None,
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut PolygonShape> {
        match self {
            Shape::Polygon(p) => Some(p),
            Shape::Rectangle(_) => None,
        }
    }
}
