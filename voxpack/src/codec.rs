//! Base64 + gzip codec for compressed audio payloads.
//!
//! The decode side recovers raw audio bytes from the payload string an agent
//! response carries. The encode side is the producer half: it packs an audio
//! file into the descriptor shape the tool server emits, metadata included.
//! Neither side inspects the audio bytes themselves; the payload is an
//! opaque blob.

use std::io::{Read as _, Write as _};
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};

/// Producer-side descriptor for a compressed audio file.
///
/// Field names follow the wire format the audio tool server emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressedAudio {
    /// Base64 encoded, gzip-compressed audio bytes.
    pub compressed_data: String,
    /// Name of the source file, without its directory.
    pub original_filename: String,
    /// Extension of the source file (`mp3`, `wav`, ...).
    pub original_format: String,
    /// Original size divided by compressed size, rounded to two decimals.
    pub compression_ratio: f64,
    /// Size of the source file in bytes.
    pub original_size: usize,
    /// Size of the gzip stream in bytes.
    pub compressed_size: usize,
}

/// Decodes a base64 payload string and gunzips the result.
///
/// Only the standard base64 alphabet is accepted. The full decompressed
/// payload is buffered in memory; size limits, where wanted, are the
/// caller's concern.
///
/// # Errors
///
/// [`DecodeError::Base64`] for an alphabet or padding violation,
/// [`DecodeError::Gunzip`] when the decoded bytes are not a valid gzip
/// stream. The stages stay separate so corruption and wrong-format input
/// can be told apart.
pub fn decode(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let compressed = BASE64.decode(encoded)?;
    let mut raw = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut raw)
        .map_err(DecodeError::Gunzip)?;
    tracing::debug!(
        compressed = compressed.len(),
        raw = raw.len(),
        "payload decoded"
    );
    Ok(raw)
}

/// Gzips `raw` and base64-encodes the stream. Inverse of [`decode`].
///
/// # Errors
///
/// [`EncodeError::Gzip`] when the compressor fails.
pub fn encode(raw: &[u8]) -> Result<String, EncodeError> {
    Ok(BASE64.encode(gzip(raw)?))
}

/// Packs the audio file at `path` into a [`CompressedAudio`] descriptor.
///
/// # Errors
///
/// [`EncodeError::Read`] when the file cannot be read,
/// [`EncodeError::Gzip`] when compression fails.
pub async fn compress_file(path: impl AsRef<Path>) -> Result<CompressedAudio, EncodeError> {
    let path = path.as_ref();
    let raw = tokio::fs::read(path)
        .await
        .map_err(|source| EncodeError::Read {
            path: path.display().to_string(),
            source,
        })?;

    let compressed = gzip(&raw)?;
    let ratio = raw.len() as f64 / compressed.len() as f64;

    let original_filename = path
        .file_name()
        .map_or_else(|| "audio".to_owned(), |name| name.to_string_lossy().into_owned());
    let original_format = path
        .extension()
        .map_or_else(|| "mp3".to_owned(), |ext| ext.to_string_lossy().into_owned());

    Ok(CompressedAudio {
        compressed_data: BASE64.encode(&compressed),
        original_filename,
        original_format,
        compression_ratio: (ratio * 100.0).round() / 100.0,
        original_size: raw.len(),
        compressed_size: compressed.len(),
    })
}

fn gzip(raw: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).map_err(EncodeError::Gzip)?;
    encoder.finish().map_err(EncodeError::Gzip)
}
