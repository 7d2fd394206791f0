//! Locating compressed audio payloads inside agent response documents.
//!
//! Agent responses arrive in more than one shape: the payload descriptor may
//! sit at the document root, inside a serialized-JSON `text` element of the
//! `content` sequence, or behind a sidecar-file indirection for payloads too
//! large to inline. The shapes are tried in a fixed priority order and the
//! first match wins.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tokio::fs;

use crate::error::LocateError;

/// A payload candidate produced by a shape matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// The base64 compressed-data string, inlined in the document.
    Inline(String),
    /// Path to a sidecar file holding the descriptor.
    FileRef(String),
}

/// Matchers applied, in order, to each nested document parsed out of a
/// `content` element. First match wins.
const NESTED_MATCHERS: &[fn(&Value) -> Option<Payload>] = &[inline_descriptor, file_indirection];

/// Shape of a sidecar payload file named by `compressedFilepath`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadFile {
    compressed_data: String,
}

/// Matches `compressedAudio.compressedData` at the document root.
fn inline_descriptor(doc: &Value) -> Option<Payload> {
    doc.get("compressedAudio")
        .and_then(|audio| audio.get("compressedData"))
        .and_then(Value::as_str)
        .map(|data| Payload::Inline(data.to_owned()))
}

/// Matches `compressedAudioInfo.compressedFilepath`.
///
/// A `compressedAudioInfo` that is present but null or empty is treated as
/// absent. The producer does not always populate the field, so the search
/// falls through instead of failing; a trace event keeps the skip visible.
fn file_indirection(doc: &Value) -> Option<Payload> {
    let info = doc.get("compressedAudioInfo")?;
    if info.is_null() || info.as_object().is_some_and(serde_json::Map::is_empty) {
        tracing::debug!("compressedAudioInfo present but empty, skipping");
        return None;
    }
    info.get("compressedFilepath")
        .and_then(Value::as_str)
        .map(|path| Payload::FileRef(path.to_owned()))
}

/// Searches `doc` for a compressed audio payload and returns its base64
/// compressed-data string.
///
/// `source_path` is the path the document was read from; relative sidecar
/// paths resolve against its parent directory. At most one extra file read
/// happens, and only when an indirection matches.
///
/// # Errors
///
/// [`LocateError::NotFound`] when no candidate shape matches, or an
/// indirection error when a matched sidecar file cannot be read or parsed.
pub async fn locate(doc: &Value, source_path: &Path) -> Result<String, LocateError> {
    if let Some(Payload::Inline(data)) = inline_descriptor(doc) {
        return Ok(data);
    }

    if let Some(elements) = doc.get("content").and_then(Value::as_array) {
        for element in elements {
            let Some(text) = element.get("text").and_then(Value::as_str) else {
                continue;
            };
            // The content sequence mixes plain prose with serialized JSON;
            // unparsable text is skipped, not fatal.
            let Ok(nested) = serde_json::from_str::<Value>(text) else {
                continue;
            };
            match NESTED_MATCHERS.iter().find_map(|matcher| matcher(&nested)) {
                Some(Payload::Inline(data)) => return Ok(data),
                Some(Payload::FileRef(path)) => {
                    return read_payload_file(&path, source_path).await;
                }
                None => {}
            }
        }
    }

    Err(LocateError::not_found(source_path.display().to_string()))
}

/// Reads and parses the sidecar file a matched indirection points at.
async fn read_payload_file(path: &str, source_path: &Path) -> Result<String, LocateError> {
    let resolved = resolve_ref(path, source_path);
    tracing::info!(path = %resolved.display(), "found compressed audio file");

    let content =
        fs::read_to_string(&resolved)
            .await
            .map_err(|source| LocateError::Indirection {
                path: resolved.display().to_string(),
                source,
            })?;
    let file: PayloadFile =
        serde_json::from_str(&content).map_err(|source| LocateError::IndirectionParse {
            path: resolved.display().to_string(),
            source,
        })?;
    Ok(file.compressed_data)
}

/// Anchors a relative sidecar path at the source document's directory.
fn resolve_ref(path: &str, source_path: &Path) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        return path.to_owned();
    }
    match source_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(path),
        _ => path.to_owned(),
    }
}
