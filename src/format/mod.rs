//! The annotation sidecar codec.
//!
//! One JSON sidecar file per image, sharing the image's base name with a
//! `.json` extension. The document layout (field names, the two
//! `shape_type` strings, the point-array nesting) is an external
//! contract consumed by other tools; see [`document`] for the schema and
//! [`codec`] for the conversion to and from the in-memory shape set.
//!
//! Reading a sidecar that does not exist is not an error (there are
//! simply no prior annotations); reading a malformed one is fatal for
//! that image's load. Writes go through a temporary file and a rename so
//! a failed save never leaves a truncated document behind.

mod codec;
mod document;
mod error;
mod sidecar;

#[cfg(test)]
mod tests;

pub use codec::{ImageMeta, decode, encode};
pub use document::{
    AnnotationDocument, FORMAT_VERSION, SHAPE_TYPE_POLYGON, SHAPE_TYPE_RECTANGLE, ShapeRecord,
};
pub use error::FormatError;
pub use sidecar::{load, save, sidecar_path};
