//! Writing recovered audio bytes to disk.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs;

use crate::error::OutputError;

/// Filename prefix for recovered audio files.
const FILE_PREFIX: &str = "decompressed_";

/// Timestamp layout baked into output filenames. One-second resolution.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Wall-clock source for output filenames.
///
/// Injected so tests can pin the timestamp and assert exact paths.
pub trait Clock {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;
}

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Writes recovered audio bytes under an output directory.
///
/// Filenames are `decompressed_<YYYY-MM-DD_HH-MM-SS>.mp3`. Two writes into
/// the same directory within the same second collide and the later one
/// wins; each invocation is an operator-triggered batch action, so the
/// second-resolution name is accepted as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioWriter<C = SystemClock> {
    clock: C,
}

impl AudioWriter {
    /// Writer using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> AudioWriter<C> {
    /// Writer with a caller-supplied clock.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Writes `data` as a new timestamped file under `output_dir` and
    /// returns the path written.
    ///
    /// The directory and any missing parents are created first; creation is
    /// idempotent. The write is a single full-buffer operation over bytes
    /// already held in memory, so no partial file is ever left behind.
    ///
    /// # Errors
    ///
    /// [`OutputError::CreateDir`] or [`OutputError::Write`] on the
    /// underlying filesystem failure.
    pub async fn write(&self, data: &[u8], output_dir: &Path) -> Result<PathBuf, OutputError> {
        fs::create_dir_all(output_dir)
            .await
            .map_err(|source| OutputError::CreateDir {
                path: output_dir.display().to_string(),
                source,
            })?;

        let timestamp = self.clock.now().format(TIMESTAMP_FORMAT);
        let path = output_dir.join(format!("{FILE_PREFIX}{timestamp}.mp3"));
        fs::write(&path, data)
            .await
            .map_err(|source| OutputError::Write {
                path: path.display().to_string(),
                source,
            })?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "audio written");
        Ok(path)
    }
}
