//! The editor session: folder navigation, image loading, and persistence.
//!
//! This is the thin controller layer between UI chrome and the core.
//! It owns the [`DrawingSurface`] for the currently open image, knows
//! which folder and image are active, and drives the sidecar codec on
//! save and load. Widgets, menus and dialogs live above this layer and
//! only ever call into it.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::{DEFAULT_LABELS, SUPPORTED_IMAGE_EXTENSIONS};
use crate::format::{self, FormatError, ImageMeta};
use crate::surface::DrawingSurface;

/// Errors surfaced by session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("annotation file error: {0}")]
    Format(#[from] FormatError),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("no image is loaded")]
    NoImage,

    #[error("image index {index} out of range ({count} images)")]
    IndexOutOfRange { index: usize, count: usize },
}

/// One annotation editing session over a folder of images.
#[derive(Debug, Default)]
pub struct AnnotationSession {
    folder: Option<PathBuf>,
    images: Vec<PathBuf>,
    current: Option<usize>,
    surface: DrawingSurface,
    labels: Vec<String>,
    meta: Option<ImageMeta>,
}

impl AnnotationSession {
    pub fn new() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    /// Open a folder, scan it for images and load the first one.
    ///
    /// Returns the number of images found; a folder without images is
    /// not an error.
    pub fn open_folder(&mut self, path: &Path) -> Result<usize, SessionError> {
        let images = scan_folder(path)?;
        log::info!("opened folder {:?} with {} images", path, images.len());

        self.folder = Some(path.to_path_buf());
        self.images = images;
        self.current = None;
        self.meta = None;
        self.surface.reset();

        if !self.images.is_empty() {
            self.open_image_at(0)?;
        }
        Ok(self.images.len())
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_image(&self) -> Option<&Path> {
        self.current.map(|i| self.images[i].as_path())
    }

    /// Metadata of the currently loaded image.
    pub fn image_meta(&self) -> Option<&ImageMeta> {
        self.meta.as_ref()
    }

    /// Load the image at `index` and apply its sidecar annotations.
    ///
    /// The surface is reset unconditionally; shapes from the previous
    /// image never carry over. A missing sidecar leaves the surface
    /// empty, a malformed one is an error (with the surface still empty
    /// and usable — no partially applied shapes).
    pub fn open_image_at(&mut self, index: usize) -> Result<(), SessionError> {
        let Some(path) = self.images.get(index).cloned() else {
            return Err(SessionError::IndexOutOfRange { index, count: self.images.len() });
        };

        let bytes = std::fs::read(&path)?;
        let raster = image::load_from_memory(&bytes)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.surface.reset();
        self.current = Some(index);
        self.meta = Some(ImageMeta::from_raster(filename, &raster)?);
        log::info!(
            "loaded image {:?} ({}x{})",
            path,
            raster.width(),
            raster.height()
        );

        if let Some((shapes, _)) = format::load(&format::sidecar_path(&path))? {
            for shape in shapes {
                self.surface.insert_shape(shape);
            }
        }
        Ok(())
    }

    /// Advance to the next image. Returns false when already at the end.
    pub fn next_image(&mut self) -> Result<bool, SessionError> {
        match self.current {
            Some(i) if i + 1 < self.images.len() => {
                self.open_image_at(i + 1)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Go back to the previous image. Returns false when already at the start.
    pub fn prev_image(&mut self) -> Result<bool, SessionError> {
        match self.current {
            Some(i) if i > 0 => {
                self.open_image_at(i - 1)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Write the current image's annotations to its sidecar file.
    pub fn save(&self) -> Result<PathBuf, SessionError> {
        let path = self.current_image().ok_or(SessionError::NoImage)?;
        let meta = self.meta.as_ref().ok_or(SessionError::NoImage)?;

        let sidecar = format::sidecar_path(path);
        format::save(&sidecar, self.surface.shapes(), meta)?;
        Ok(sidecar)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Add a label to the list. Rejects empty names and duplicates.
    pub fn add_label(&mut self, name: &str) -> bool {
        if name.is_empty() || self.labels.iter().any(|l| l == name) {
            return false;
        }
        self.labels.push(name.to_string());
        true
    }

    pub fn remove_label(&mut self, name: &str) -> bool {
        let before = self.labels.len();
        self.labels.retain(|l| l != name);
        self.labels.len() != before
    }

    /// Forwarded to the surface: label for the next committed shape.
    pub fn set_pending_label(&mut self, label: &str) {
        self.surface.set_pending_label(label);
    }

    /// Forwarded to the surface; silently false without a selection.
    pub fn delete_selected(&mut self) -> bool {
        self.surface.delete_selected()
    }

    /// Forwarded to the surface; silently false without a selection.
    pub fn relabel_selected(&mut self, label: &str) -> bool {
        self.surface.relabel_selected(label)
    }
}

/// List the supported images in a folder, sorted by path.
fn scan_folder(path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut images: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && has_supported_extension(p))
        .collect();
    images.sort();
    Ok(images)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}
