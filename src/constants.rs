//! Global constants for the annotation core.

/// Image file extensions picked up by the folder scan (lowercase).
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// Labels seeded into a fresh session's label list.
pub const DEFAULT_LABELS: &[&str] = &["cat", "dog", "person", "car", "tree"];
