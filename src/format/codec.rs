//! Conversion between the in-memory shape set and the document schema.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::format::document::{
    AnnotationDocument, FORMAT_VERSION, SHAPE_TYPE_POLYGON, SHAPE_TYPE_RECTANGLE, ShapeRecord,
};
use crate::format::error::FormatError;
use crate::geometry::{Point, Rect};
use crate::model::{PolygonShape, RectangleShape, Shape};

/// Metadata of the image a shape set belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMeta {
    /// File name (no directory component).
    pub filename: String,
    pub width: u32,
    pub height: u32,
    /// PNG-encoded raster for embedding, if available.
    pub png_data: Option<Vec<u8>>,
}

impl ImageMeta {
    pub fn new(filename: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            filename: filename.into(),
            width,
            height,
            png_data: None,
        }
    }

    pub fn with_png_data(mut self, data: Vec<u8>) -> Self {
        self.png_data = Some(data);
        self
    }

    /// Build metadata from a decoded raster, re-encoding it as PNG for
    /// lossless embedding.
    pub fn from_raster(
        filename: impl Into<String>,
        raster: &image::DynamicImage,
    ) -> Result<Self, FormatError> {
        let mut buf = std::io::Cursor::new(Vec::new());
        raster.write_to(&mut buf, image::ImageFormat::Png)?;
        Ok(Self {
            filename: filename.into(),
            width: raster.width(),
            height: raster.height(),
            png_data: Some(buf.into_inner()),
        })
    }
}

/// Serialize a shape collection and its image metadata into a document.
pub fn encode<'a, I>(shapes: I, meta: &ImageMeta) -> AnnotationDocument
where
    I: IntoIterator<Item = &'a Shape>,
{
    let shapes = shapes
        .into_iter()
        .map(|shape| match shape {
            Shape::Polygon(poly) => ShapeRecord::polygon(poly.label(), poly.points()),
            Shape::Rectangle(rect) => ShapeRecord::rectangle(rect.label(), rect.rect()),
        })
        .collect();

    AnnotationDocument {
        version: FORMAT_VERSION.to_string(),
        flags: serde_json::Map::new(),
        shapes,
        image_path: meta.filename.clone(),
        image_data: meta.png_data.as_ref().map(|d| BASE64.encode(d)),
        image_height: meta.height,
        image_width: meta.width,
    }
}

/// Reconstruct the shape collection and image metadata from a document.
///
/// Records with an unknown `shape_type` are skipped (a newer producer
/// may know kinds we don't), as are rectangle records without exactly
/// two corner pairs. Polygon vertex counts are not validated: the
/// interactive minimum applies at commit time, not to stored data.
pub fn decode(doc: &AnnotationDocument) -> Result<(Vec<Shape>, ImageMeta), FormatError> {
    let mut shapes = Vec::with_capacity(doc.shapes.len());

    for record in &doc.shapes {
        match record.shape_type.as_str() {
            SHAPE_TYPE_POLYGON => {
                let points = record.points.iter().map(|[x, y]| Point::new(*x, *y)).collect();
                shapes.push(Shape::Polygon(PolygonShape::new(points, record.label.clone())));
            }
            SHAPE_TYPE_RECTANGLE => match record.points.as_slice() {
                [tl, br] => {
                    // Stored corners are trusted to be normalized already.
                    let rect = Rect {
                        left: tl[0],
                        top: tl[1],
                        right: br[0],
                        bottom: br[1],
                    };
                    shapes.push(Shape::Rectangle(RectangleShape::new(
                        rect,
                        record.label.clone(),
                    )));
                }
                other => {
                    log::warn!(
                        "rectangle record {:?} has {} point pairs, expected 2; skipping",
                        record.label,
                        other.len()
                    );
                }
            },
            unknown => {
                log::warn!("unknown shape type {:?}; skipping record", unknown);
            }
        }
    }

    let png_data = match &doc.image_data {
        Some(encoded) => Some(BASE64.decode(encoded)?),
        None => None,
    };

    let meta = ImageMeta {
        filename: doc.image_path.clone(),
        width: doc.image_width,
        height: doc.image_height,
        png_data,
    };

    Ok((shapes, meta))
}
