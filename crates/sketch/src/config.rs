//! Configuration and error types for recipe sketching.
//!
//! Like the rest of the crate this module performs no I/O; a sketch is a
//! pure function of `(recipe, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire layout of an encoded hash.
///
/// The two layouts decode into the same [`crate::Histogram`] type, so
/// hashes of either format can be compared as long as their bucket counts
/// agree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum HashFormat {
    /// Two hex digits per bucket and no version tag. Counters above `0xff`
    /// are clamped before rendering.
    Legacy,
    /// Four hex digits per bucket, tagged with the `v2:` prefix. Counters
    /// above `0xffff` are clamped.
    #[default]
    Wide,
}

impl HashFormat {
    /// Hex digits used per bucket.
    pub fn field_width(&self) -> usize {
        match self {
            HashFormat::Legacy => 2,
            HashFormat::Wide => 4,
        }
    }

    /// Largest counter value the field can hold.
    pub fn max_count(&self) -> u32 {
        match self {
            HashFormat::Legacy => 0xff,
            HashFormat::Wide => 0xffff,
        }
    }

    /// Version tag prepended to the base64 text, without the `:` separator.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            HashFormat::Legacy => None,
            HashFormat::Wide => Some("v2"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashFormat::Legacy => "legacy",
            HashFormat::Wide => "wide",
        }
    }
}

/// Parameters of the sketch pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SketchConfig {
    /// Configuration schema version.
    ///
    /// Any change that can alter a hash for the same recipe must bump it.
    pub version: u32,
    /// Number of histogram buckets.
    ///
    /// Hashes are only comparable when produced with the same value.
    pub buckets: usize,
    /// Wire layout of the encoded hash.
    pub format: HashFormat,
    /// Ceiling on the difference a single bucket contributes to the
    /// distance, and the per-bucket divisor of the similarity score.
    pub max_bucket_delta: u32,
}

impl SketchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn with_format(mut self, format: HashFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_max_bucket_delta(mut self, delta: u32) -> Self {
        self.max_bucket_delta = delta;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), SketchError> {
        if self.version < 1 {
            return Err(SketchError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.buckets < 1 {
            return Err(SketchError::InvalidConfigBuckets {
                buckets: self.buckets,
            });
        }
        if self.max_bucket_delta < 1 {
            return Err(SketchError::InvalidConfigDelta {
                delta: self.max_bucket_delta,
            });
        }
        Ok(())
    }

    /// Key under which this configuration's hash is memoized on a recipe.
    pub(crate) fn cache_key(&self) -> String {
        format!(
            "{}/{}/{}",
            crate::SKETCH_ALGORITHM,
            self.buckets,
            self.format.name()
        )
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            version: 1,
            buckets: 256,
            format: HashFormat::Wide,
            max_bucket_delta: 16,
        }
    }
}

/// Why an encoded hash could not be turned back into a histogram.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown hash version tag '{0}'")]
    UnknownVersion(String),

    #[error("invalid base64: {0}")]
    Base64(String),

    #[error("corrupt compressed payload: {0}")]
    Decompress(String),

    #[error("invalid hex payload: {0}")]
    Hex(String),

    #[error("payload length {len} is not a multiple of field width {width}")]
    Truncated { len: usize, width: usize },

    #[error("payload holds no buckets")]
    Empty,
}

/// Errors returned by the sketch pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SketchError {
    #[error("invalid config: buckets must be >= 1 (got {buckets})")]
    InvalidConfigBuckets { buckets: usize },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid config: max_bucket_delta must be >= 1 (got {delta})")]
    InvalidConfigDelta { delta: u32 },

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("histogram length mismatch: {left} vs {right} buckets")]
    LengthMismatch { left: usize, right: usize },

    #[error("compression failed: {0}")]
    Compression(String),
}

impl SketchError {
    pub fn is_decode(&self) -> bool {
        matches!(self, SketchError::Decode(_))
    }
}
