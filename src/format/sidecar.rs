//! Sidecar file naming and durable load/save.

use std::path::{Path, PathBuf};

use crate::format::codec::{self, ImageMeta};
use crate::format::document::AnnotationDocument;
use crate::format::error::FormatError;
use crate::model::Shape;

/// Path of the annotation sidecar for an image: same base name, `.json`.
pub fn sidecar_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("json")
}

/// Read a sidecar file.
///
/// An absent file means "no prior annotations" and yields `Ok(None)`;
/// malformed content is an error and nothing is returned, so a caller
/// never sees a partially decoded shape set.
pub fn load(path: &Path) -> Result<Option<(Vec<Shape>, ImageMeta)>, FormatError> {
    if !path.exists() {
        log::debug!("no sidecar at {:?}", path);
        return Ok(None);
    }

    let text = std::fs::read_to_string(path)?;
    let doc: AnnotationDocument = serde_json::from_str(&text)?;
    let (shapes, meta) = codec::decode(&doc)?;
    log::info!("loaded {} shapes from {:?}", shapes.len(), path);
    Ok(Some((shapes, meta)))
}

/// Write a sidecar file atomically.
///
/// The document is serialized to a temporary sibling first and renamed
/// over the target, so the previous file survives a failed write intact.
pub fn save<'a, I>(path: &Path, shapes: I, meta: &ImageMeta) -> Result<(), FormatError>
where
    I: IntoIterator<Item = &'a Shape>,
{
    let doc = codec::encode(shapes, meta);
    let json = serde_json::to_string_pretty(&doc)?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    if let Err(err) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(err.into());
    }

    log::info!("saved {} shapes to {:?}", doc.shapes.len(), path);
    Ok(())
}
