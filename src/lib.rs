//! limn — an interactive image region annotation core.
//!
//! The crate implements the engine behind a labeling tool: a pointer
//! driven drawing surface that turns click sequences into committed
//! polygon and rectangle regions, geometry editing of committed shapes
//! (vertex drags, whole-shape moves), and a versioned JSON sidecar
//! format that persists the shape set next to its image losslessly.
//!
//! It is deliberately headless: rendering, widgets and menus live in
//! whatever frontend hosts the [`surface::DrawingSurface`] and
//! [`session::AnnotationSession`].

pub mod constants;
pub mod format;
pub mod geometry;
pub mod model;
pub mod session;
pub mod surface;

pub use format::{AnnotationDocument, FormatError, ImageMeta};
pub use geometry::{Point, Rect};
pub use model::{PolygonShape, RectangleShape, Shape, ShapeId, ShapeStore};
pub use session::{AnnotationSession, SessionError};
pub use surface::{CursorHint, DrawMode, DrawPreview, DrawingSurface, SurfaceEvent};
