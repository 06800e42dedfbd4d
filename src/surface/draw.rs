//! The drawing mode state machine.
//!
//! [`DrawState`] is a plain value type driven by [`DrawState::handle`],
//! so the whole pointer protocol can be tested without a surface, a
//! renderer, or an event loop. The surface feeds it every pointer and
//! keyboard input and acts on the returned [`DrawEffect`].

use crate::geometry::{Point, Rect};
use crate::model::MIN_POLYGON_VERTICES;

/// The active interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Selection and editing of committed shapes.
    #[default]
    Idle,
    /// Click-to-add-vertex polygon drawing.
    Polygon,
    /// Press-drag-release rectangle drawing.
    Rectangle,
}

/// An uncommitted rectangle being dragged out from its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectDraft {
    /// The press point; one corner of the rectangle.
    pub anchor: Point,
    /// Normalized span of anchor and the current pointer position.
    pub rect: Rect,
}

/// The drawing state, including any in-progress shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DrawState {
    #[default]
    Idle,
    Polygon {
        /// Vertices accumulated so far, in click order.
        points: Vec<Point>,
        /// Preview segment from the last vertex to the pointer.
        rubber_band: Option<(Point, Point)>,
    },
    Rectangle {
        draft: Option<RectDraft>,
    },
}

/// Input consumed by the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawInput {
    SetMode(DrawMode),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    DoubleClick(Point),
    Escape,
}

/// Outcome of one transition.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEffect {
    /// State may have changed, nothing to act on.
    None,
    /// The input was not consumed; idle-mode selection handling applies.
    Forwarded,
    /// A polygon is complete; the vertices are handed over in click order.
    PolygonCommitted(Vec<Point>),
    /// A rectangle is complete; drawing mode stays active for the next one.
    RectangleCommitted(Rect),
}

impl DrawState {
    pub fn mode(&self) -> DrawMode {
        match self {
            DrawState::Idle => DrawMode::Idle,
            DrawState::Polygon { .. } => DrawMode::Polygon,
            DrawState::Rectangle { .. } => DrawMode::Rectangle,
        }
    }

    /// Advance the machine by one input.
    pub fn handle(&mut self, input: DrawInput) -> DrawEffect {
        match self {
            DrawState::Idle => match input {
                DrawInput::SetMode(mode) => {
                    *self = DrawState::enter(mode);
                    DrawEffect::None
                }
                DrawInput::Escape => DrawEffect::None,
                _ => DrawEffect::Forwarded,
            },

            DrawState::Polygon { points, rubber_band } => match input {
                DrawInput::SetMode(mode) => {
                    *self = DrawState::enter(mode);
                    DrawEffect::None
                }
                DrawInput::PointerDown(p) => {
                    points.push(p);
                    *rubber_band = Some((p, p));
                    DrawEffect::None
                }
                DrawInput::PointerMove(p) => {
                    if let Some(last) = points.last() {
                        *rubber_band = Some((*last, p));
                    }
                    DrawEffect::None
                }
                DrawInput::DoubleClick(_) => {
                    // Too few points: the double-click is a no-op and the
                    // mode stays active.
                    if points.len() < MIN_POLYGON_VERTICES {
                        return DrawEffect::None;
                    }
                    let committed = std::mem::take(points);
                    *self = DrawState::Idle;
                    DrawEffect::PolygonCommitted(committed)
                }
                DrawInput::Escape => {
                    *self = DrawState::Idle;
                    DrawEffect::None
                }
                DrawInput::PointerUp(_) => DrawEffect::None,
            },

            DrawState::Rectangle { draft } => match input {
                DrawInput::SetMode(mode) => {
                    *self = DrawState::enter(mode);
                    DrawEffect::None
                }
                DrawInput::PointerDown(p) => {
                    *draft = Some(RectDraft {
                        anchor: p,
                        rect: Rect::from_corners(p, p),
                    });
                    DrawEffect::None
                }
                DrawInput::PointerMove(p) => {
                    if let Some(d) = draft {
                        d.rect = Rect::from_corners(d.anchor, p);
                    }
                    DrawEffect::None
                }
                DrawInput::PointerUp(_) => match draft.take() {
                    // The mode stays Rectangle: the next press starts a
                    // new draft (multi-shape drawing session).
                    Some(d) => DrawEffect::RectangleCommitted(d.rect),
                    None => DrawEffect::None,
                },
                DrawInput::Escape => {
                    *self = DrawState::Idle;
                    DrawEffect::None
                }
                DrawInput::DoubleClick(_) => DrawEffect::None,
            },
        }
    }

    /// Fresh state for a mode; any in-progress work is discarded.
    fn enter(mode: DrawMode) -> Self {
        match mode {
            DrawMode::Idle => DrawState::Idle,
            DrawMode::Polygon => DrawState::Polygon {
                points: Vec::new(),
                rubber_band: None,
            },
            DrawMode::Rectangle => DrawState::Rectangle { draft: None },
        }
    }
}
