//! The persisted annotation document schema.
//!
//! Field names and the `shape_type` strings are a fixed external
//! contract: downstream consumers match on them verbatim. Extending the
//! schema means adding fields, never renaming these.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geometry::{Point, Rect};

/// Format version written into every document.
pub const FORMAT_VERSION: &str = "5.4.1";

/// `shape_type` value for polygon records.
pub const SHAPE_TYPE_POLYGON: &str = "polygon";

/// `shape_type` value for rectangle records.
pub const SHAPE_TYPE_RECTANGLE: &str = "rectangle";

/// One annotation sidecar document: format version, the shape records,
/// and the metadata of the image they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDocument {
    pub version: String,

    /// Extensible document-level flags; currently always empty.
    #[serde(default)]
    pub flags: Map<String, Value>,

    #[serde(default)]
    pub shapes: Vec<ShapeRecord>,

    /// File name of the annotated image (no directory component).
    #[serde(rename = "imagePath")]
    pub image_path: String,

    /// The raster, re-encoded as PNG and base64-armored.
    #[serde(rename = "imageData", default)]
    pub image_data: Option<String>,

    #[serde(rename = "imageHeight")]
    pub image_height: u32,

    #[serde(rename = "imageWidth")]
    pub image_width: u32,
}

/// One persisted shape.
///
/// Polygons carry one `[x, y]` pair per vertex in drawing order;
/// rectangles exactly two pairs, top-left then bottom-right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub label: String,

    pub points: Vec<[f64; 2]>,

    /// Reserved for grouping related shapes; always null today. Kept in
    /// the output (not skipped) because consumers expect the key.
    #[serde(default)]
    pub group_id: Option<i64>,

    /// `"polygon"`, `"rectangle"`, or a value from a newer producer.
    /// Kept as a string so unknown kinds survive parsing and can be
    /// skipped instead of failing the whole document.
    pub shape_type: String,

    /// Extensible per-shape flags; currently always empty.
    #[serde(default)]
    pub flags: Map<String, Value>,
}

impl ShapeRecord {
    /// Build a polygon record from vertices in drawing order.
    pub fn polygon(label: impl Into<String>, points: &[Point]) -> Self {
        Self {
            label: label.into(),
            points: points.iter().map(|p| [p.x, p.y]).collect(),
            group_id: None,
            shape_type: SHAPE_TYPE_POLYGON.to_string(),
            flags: Map::new(),
        }
    }

    /// Build a rectangle record from a normalized rectangle.
    pub fn rectangle(label: impl Into<String>, rect: Rect) -> Self {
        Self {
            label: label.into(),
            points: vec![[rect.left, rect.top], [rect.right, rect.bottom]],
            group_id: None,
            shape_type: SHAPE_TYPE_RECTANGLE.to_string(),
            flags: Map::new(),
        }
    }
}
