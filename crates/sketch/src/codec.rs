//! Histogram codec: histogram ⇄ transport-safe text.
//!
//! # Encoding
//!
//! ```text
//! hex     = concat(format!("{count:0W$x}") for each bucket)   W = 2 (legacy) | 4 (wide)
//! encoded = [tag ":"] base64(gzip(hex))
//! ```
//!
//! Legacy hashes carry no tag. Base64 text never contains `:`, so the
//! presence of a tag is unambiguous. Counters larger than the field allows
//! are clamped to the field maximum before rendering.

use std::fmt::Write as _;
use std::io::{Read, Write};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::config::{DecodeError, HashFormat, SketchError};
use crate::histogram::Histogram;

/// Render a histogram as fixed-width lowercase hex.
pub fn to_hex(histogram: &Histogram, format: HashFormat) -> String {
    let width = format.field_width();
    let max = format.max_count();
    let mut out = String::with_capacity(histogram.len() * width);
    for &count in histogram.counts() {
        let _ = write!(out, "{:0width$x}", count.min(max), width = width);
    }
    out
}

/// Parse a fixed-width hex payload back into counts.
pub fn from_hex(payload: &[u8], format: HashFormat) -> Result<Histogram, DecodeError> {
    let width = format.field_width();
    if payload.is_empty() {
        return Err(DecodeError::Empty);
    }
    if payload.len() % width != 0 {
        return Err(DecodeError::Truncated {
            len: payload.len(),
            width,
        });
    }
    let bytes = hex::decode(payload).map_err(|e| DecodeError::Hex(e.to_string()))?;
    let counts = match format {
        HashFormat::Legacy => bytes.into_iter().map(u32::from).collect(),
        HashFormat::Wide => bytes
            .chunks_exact(2)
            .map(|pair| u32::from(u16::from_be_bytes([pair[0], pair[1]])))
            .collect(),
    };
    Ok(Histogram::from_counts(counts))
}

/// Encode a histogram into its compressed, base64 text form.
pub fn encode(histogram: &Histogram, format: HashFormat) -> Result<String, SketchError> {
    let hex = to_hex(histogram, format);
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(hex.as_bytes())
        .map_err(|e| SketchError::Compression(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| SketchError::Compression(e.to_string()))?;

    let body = BASE64.encode(compressed);
    Ok(match format.tag() {
        Some(tag) => format!("{tag}:{body}"),
        None => body,
    })
}

/// Detect the wire format of an encoded hash and split off its body.
pub fn detect_format(encoded: &str) -> Result<(HashFormat, &str), DecodeError> {
    match encoded.split_once(':') {
        None => Ok((HashFormat::Legacy, encoded)),
        Some((tag, body)) if Some(tag) == HashFormat::Wide.tag() => Ok((HashFormat::Wide, body)),
        Some((tag, _)) => Err(DecodeError::UnknownVersion(tag.to_string())),
    }
}

/// Decode an encoded hash of either format.
pub fn decode(encoded: &str) -> Result<Histogram, SketchError> {
    let (format, body) = detect_format(encoded.trim())?;
    let compressed = BASE64
        .decode(body)
        .map_err(|e| DecodeError::Base64(e.to_string()))?;
    if compressed.is_empty() {
        return Err(DecodeError::Decompress("empty payload".to_string()).into());
    }

    let mut payload = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut payload)
        .map_err(|e| DecodeError::Decompress(e.to_string()))?;

    Ok(from_hex(&payload, format)?)
}
