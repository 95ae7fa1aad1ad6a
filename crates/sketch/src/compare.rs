//! Similarity scoring between two histograms.
//!
//! ```text
//! distance   = Σ min(|a_i - b_i|, max_delta)
//! similarity = 1 - distance / (max_delta × buckets)      clamped to [0, 1]
//! ```
//!
//! Capping each bucket's contribution at `max_delta` keeps the distance
//! inside `[0, max_delta × buckets]`, so the score never leaves `[0, 1]`.

use recipe::Recipe;
use tracing::trace;

use crate::codec::decode;
use crate::config::{SketchConfig, SketchError};
use crate::histogram::Histogram;

/// One side of a comparison: a recipe, or a hash produced earlier.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Recipe(&'a Recipe),
    Encoded(&'a str),
}

impl<'a> From<&'a Recipe> for Operand<'a> {
    fn from(value: &'a Recipe) -> Self {
        Operand::Recipe(value)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(value: &'a str) -> Self {
        Operand::Encoded(value)
    }
}

impl<'a> From<&'a String> for Operand<'a> {
    fn from(value: &'a String) -> Self {
        Operand::Encoded(value.as_str())
    }
}

impl Operand<'_> {
    /// Decoded histogram for this operand. Recipes go through the memoized
    /// hash so both sides see the same wire clamping.
    pub fn histogram(&self, cfg: &SketchConfig) -> Result<Histogram, SketchError> {
        match self {
            Operand::Recipe(recipe) => decode(&crate::hash(recipe, cfg)?),
            Operand::Encoded(text) => decode(text),
        }
    }
}

/// Sum of per-bucket absolute differences, each capped at `max_delta`.
pub fn distance(a: &Histogram, b: &Histogram, max_delta: u32) -> Result<u64, SketchError> {
    if a.len() != b.len() {
        return Err(SketchError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a
        .counts()
        .iter()
        .zip(b.counts())
        .map(|(&x, &y)| u64::from(x.abs_diff(y).min(max_delta)))
        .sum())
}

/// Similarity score in `[0, 1]` between two histograms.
pub fn compare_histograms(a: &Histogram, b: &Histogram, max_delta: u32) -> Result<f64, SketchError> {
    if max_delta == 0 {
        return Err(SketchError::InvalidConfigDelta { delta: max_delta });
    }
    let dist = distance(a, b, max_delta)?;
    if a.is_empty() {
        return Ok(1.0);
    }
    let ceiling = f64::from(max_delta) * a.len() as f64;
    let score = (1.0 - dist as f64 / ceiling).clamp(0.0, 1.0);
    trace!(distance = dist, buckets = a.len(), score, "histograms_compared");
    Ok(score)
}

/// Similarity between two operands, each a recipe or an encoded hash.
///
/// Decode failures abort the comparison; no fallback score is invented.
pub fn similarity<'a, 'b>(
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'b>>,
    cfg: &SketchConfig,
) -> Result<f64, SketchError> {
    cfg.validate()?;
    let left: Operand<'a> = a.into();
    let right: Operand<'b> = b.into();
    compare_histograms(
        &left.histogram(cfg)?,
        &right.histogram(cfg)?,
        cfg.max_bucket_delta,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;
    use crate::config::{DecodeError, HashFormat};

    #[test]
    fn identical_histograms_score_one() {
        let h = Histogram::from_counts(vec![1, 2, 3, 0]);
        assert_eq!(distance(&h, &h, 16).unwrap(), 0);
        assert_eq!(compare_histograms(&h, &h, 16).unwrap(), 1.0);
    }

    #[test]
    fn one_bucket_off_by_one() {
        let a = Histogram::from_counts(vec![0; 256]);
        let mut b = a.clone();
        b.increment(7);
        let score = compare_histograms(&a, &b, 16).unwrap();
        assert!((score - (1.0 - 1.0 / 4096.0)).abs() < 1e-12);
    }

    #[test]
    fn per_bucket_delta_is_capped() {
        let a = Histogram::from_counts(vec![0, 0]);
        let b = Histogram::from_counts(vec![100, 4]);
        assert_eq!(distance(&a, &b, 16).unwrap(), 20);
    }

    #[test]
    fn maximally_different_scores_zero() {
        let a = Histogram::from_counts(vec![0, 40]);
        let b = Histogram::from_counts(vec![40, 0]);
        assert_eq!(compare_histograms(&a, &b, 16).unwrap(), 0.0);
    }

    #[test]
    fn comparison_is_symmetric() {
        let a = Histogram::from_counts(vec![3, 0, 1, 9]);
        let b = Histogram::from_counts(vec![0, 2, 1, 4]);
        assert_eq!(
            compare_histograms(&a, &b, 16).unwrap(),
            compare_histograms(&b, &a, 16).unwrap()
        );
    }

    #[test]
    fn length_mismatch_is_reported() {
        let a = Histogram::new(4);
        let b = Histogram::new(8);
        assert_eq!(
            compare_histograms(&a, &b, 16),
            Err(SketchError::LengthMismatch { left: 4, right: 8 })
        );
    }

    #[test]
    fn zero_delta_is_rejected() {
        let h = Histogram::new(2);
        assert!(matches!(
            compare_histograms(&h, &h, 0),
            Err(SketchError::InvalidConfigDelta { delta: 0 })
        ));
    }

    #[test]
    fn encoded_operands_compare_across_formats() {
        let h = Histogram::from_counts(vec![1, 0, 5, 2]);
        let legacy = encode(&h, HashFormat::Legacy).unwrap();
        let wide = encode(&h, HashFormat::Wide).unwrap();
        let score = similarity(legacy.as_str(), &wide, &SketchConfig::default()).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn garbage_operand_is_a_decode_error() {
        let h = encode(&Histogram::new(4), HashFormat::Wide).unwrap();
        let err = similarity(&h, "not-base64!!", &SketchConfig::default()).unwrap_err();
        assert!(matches!(err, SketchError::Decode(DecodeError::Base64(_))));
    }
}
