//! Error types for payload recovery.
//!
//! Each pipeline stage has its own error enum; all of them convert into the
//! top-level [`Error`] so the whole recovery can be driven with `?`.

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for voxpack operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Payload search failed.
    #[error("locate: {0}")]
    Locate(#[from] LocateError),

    /// Base64 or gzip decode failed.
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),

    /// Compression of a source file failed.
    #[error("encode: {0}")]
    Encode(#[from] EncodeError),

    /// Writing the recovered audio failed.
    #[error("output: {0}")]
    Output(#[from] OutputError),

    /// IO error outside any specific stage (e.g. reading the input file).
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for voxpack operations.
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Stage Errors
// ============================================================================

/// Error type for the payload locator.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// Every candidate shape was tried and none matched.
    #[error("no compressed audio payload found in {0}")]
    NotFound(String),

    /// The sidecar file named by an indirection could not be read.
    #[error("cannot read indirection file {path}: {source}")]
    Indirection {
        /// Resolved path of the sidecar file.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// The sidecar file was read but is not a valid payload document.
    #[error("invalid indirection file {path}: {source}")]
    IndirectionParse {
        /// Resolved path of the sidecar file.
        path: String,
        /// Underlying parse failure.
        source: serde_json::Error,
    },
}

impl LocateError {
    /// Create a not-found error for the given source document.
    #[inline]
    pub fn not_found(source_path: impl Into<String>) -> Self {
        Self::NotFound(source_path.into())
    }
}

/// Error type for payload decoding.
///
/// The two stages stay distinguishable so callers can tell wrong-format
/// input (base64) from a corrupted payload (gzip).
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload string is not valid standard-alphabet base64.
    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not a valid gzip stream.
    #[error("gunzip: {0}")]
    Gunzip(#[source] std::io::Error),
}

/// Error type for payload encoding and file compression.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The source audio file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path of the source file.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// Compressing the bytes failed.
    #[error("gzip: {0}")]
    Gzip(#[source] std::io::Error),
}

/// Error type for the result writer.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The output directory could not be created.
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        /// Directory that was being created.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// The output file could not be written.
    #[error("cannot write {path}: {source}")]
    Write {
        /// File that was being written.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },
}

// ============================================================================
// Tests
// ============================================================================
