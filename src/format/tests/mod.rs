//! Unit tests for the annotation sidecar codec.
//!
//! These verify the external document contract (exact field names and
//! nesting), lossless round-trips, and the file-level load/save rules.
