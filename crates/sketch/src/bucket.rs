//! Bucket hashing: token → bucket index → histogram.
//!
//! # Algorithm
//!
//! ```text
//! bucket = u32_be(MD5(lowercase(token))[0..4]) mod buckets
//! ```
//!
//! MD5 is used as a stable, uniformly distributed digest, not for security.
//! Changing the digest changes every hash and must bump the hash format.

use md5::{Digest, Md5};

use crate::config::SketchError;
use crate::features::FeatureToken;
use crate::histogram::Histogram;

/// Bucket that `key` falls into when there are `buckets` buckets.
///
/// `buckets` must be non-zero.
#[inline]
pub fn bucket_index(key: &str, buckets: usize) -> usize {
    let digest = Md5::digest(key.as_bytes());
    let head = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    (u64::from(head) % buckets as u64) as usize
}

/// Count tokens per bucket.
pub fn bucket_histogram(tokens: &[FeatureToken], buckets: usize) -> Result<Histogram, SketchError> {
    if buckets == 0 {
        return Err(SketchError::InvalidConfigBuckets { buckets });
    }
    let mut histogram = Histogram::new(buckets);
    for token in tokens {
        histogram.increment(bucket_index(&token.hash_key(), buckets));
    }
    Ok(histogram)
}
