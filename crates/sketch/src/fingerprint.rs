//! Sketch artifact and metadata.
//!
//! The encoded string is the comparison unit; the histogram and metadata are
//! kept alongside it for inspection and traceability.

use serde::{Deserialize, Serialize};

use crate::config::HashFormat;
use crate::histogram::Histogram;

/// Result of sketching one recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeSketch {
    /// Number of feature tokens the recipe produced.
    pub token_count: usize,
    /// Bucket counts before any wire clamping.
    pub histogram: Histogram,
    /// Compressed, base64 form of the histogram.
    pub encoded: String,
    pub meta: SketchMeta,
}

/// How a sketch was produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SketchMeta {
    /// Sketch algorithm version owned by this crate.
    pub sketch_version: u16,
    /// Human-readable algorithm identifier.
    pub algorithm_name: String,
    pub buckets: usize,
    pub format: HashFormat,
    pub max_bucket_delta: u32,
    /// Configuration schema version supplied by the caller.
    pub config_version: u32,
}
