//! # Recipe similarity sketches
//!
//! Projects a recipe's ingredients and step structure into a fixed-size
//! bucket histogram, encodes it as compact text, and scores the distance
//! between two such encodings.
//!
//! ## Contract
//!
//! - Recipes are read through the `recipe` crate's accessors only.
//! - [`hash`] and [`sketch`] are pure functions of `(recipe, config)`: no I/O,
//!   no clocks, no process state. The only side effect is the memo slot on
//!   the recipe instance, which the recipe clears on every mutation.
//!
//! Invariant: for the same recipe content and the same [`SketchConfig`],
//! the encoded hash is identical across runs and machines.
//!
//! ## Pipeline
//!
//! 1.  **Feature extraction**: ingredient names, then per step (depth-first
//!     through parallel threads) action tags and fields, cue and sensory
//!     check tags and descriptions.
//! 2.  **Bucket hashing**: each lowercased token goes through MD5; the first
//!     four digest bytes modulo the bucket count pick a counter to bump.
//! 3.  **Encoding**: counters render as fixed-width hex, get gzipped and
//!     base64 encoded. The wide format is tagged `v2:`.
//! 4.  **Comparison**: L1 distance with a per-bucket cap, normalized into a
//!     similarity in `[0, 1]`.
//!
//! ## Example Usage
//!
//! ```
//! use recipe::{Ingredient, RecipeBuilder};
//! use sketch::{hash, similarity, SketchConfig};
//!
//! let tea = RecipeBuilder::new("Tea")
//!     .ingredient(Ingredient::new("Water"))
//!     .ingredient(Ingredient::new("Tea leaves"))
//!     .step(|s| s.mix(None))
//!     .build()
//!     .unwrap();
//!
//! let cfg = SketchConfig::default();
//! let encoded = hash(&tea, &cfg).unwrap();
//! assert!(encoded.starts_with("v2:"));
//! assert_eq!(similarity(&tea, &encoded, &cfg).unwrap(), 1.0);
//! ```

pub mod bucket;
pub mod codec;
pub mod compare;
pub mod config;
pub mod features;
pub mod fingerprint;
mod histogram;

use recipe::Recipe;
use tracing::{debug, trace};

pub use crate::bucket::{bucket_histogram, bucket_index};
pub use crate::codec::{decode, encode};
pub use crate::compare::{compare_histograms, distance, similarity, Operand};
pub use crate::config::{DecodeError, HashFormat, SketchConfig, SketchError};
pub use crate::features::{extract_features, FeatureToken};
pub use crate::fingerprint::{RecipeSketch, SketchMeta};
pub use crate::histogram::Histogram;

/// Current sketch algorithm version for this crate.
pub const SKETCH_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const SKETCH_ALGORITHM: &str = "md5bucket_gzip_b64_v1";

/// Compute the full sketch of a recipe and memoize its encoded hash.
pub fn sketch(recipe: &Recipe, cfg: &SketchConfig) -> Result<RecipeSketch, SketchError> {
    cfg.validate()?;

    // Step 1: enumerate feature tokens in traversal order.
    let tokens = extract_features(recipe);

    // Step 2: fold them into the bucket histogram.
    let histogram = bucket_histogram(&tokens, cfg.buckets)?;

    // Step 3: render, compress and encode.
    let encoded = encode(&histogram, cfg.format)?;

    trace!(
        recipe = %recipe.name(),
        tokens = tokens.len(),
        occupied = histogram.occupied(),
        buckets = cfg.buckets,
        "recipe_sketched"
    );
    recipe.digests().store(cfg.cache_key(), encoded.clone());

    Ok(RecipeSketch {
        token_count: tokens.len(),
        histogram,
        encoded,
        meta: SketchMeta {
            sketch_version: SKETCH_VERSION,
            algorithm_name: SKETCH_ALGORITHM.to_string(),
            buckets: cfg.buckets,
            format: cfg.format,
            max_bucket_delta: cfg.max_bucket_delta,
            config_version: cfg.version,
        },
    })
}

/// Encoded hash of a recipe, memoized on the recipe instance.
pub fn hash(recipe: &Recipe, cfg: &SketchConfig) -> Result<String, SketchError> {
    cfg.validate()?;
    let key = cfg.cache_key();
    if let Some(cached) = recipe.digests().get(&key) {
        debug!(recipe = %recipe.name(), key = %key, "sketch_cache_hit");
        return Ok(cached);
    }
    debug!(recipe = %recipe.name(), key = %key, "sketch_cache_miss");
    Ok(sketch(recipe, cfg)?.encoded)
}
