//! Voxpack recovers gzip-compressed audio payloads embedded in agent
//! response documents and writes them back to disk as playable files.
//!
//! Responses from the audio tool server embed the payload in one of several
//! loosely-structured shapes; [`locate`] walks them in priority order,
//! [`codec::decode`] unpacks the base64 gzip string, and
//! [`output::AudioWriter`] persists the bytes under a timestamped name.
//! [`pipeline::recover`] wires the three together for the CLI.

pub mod codec;
pub mod error;
pub mod locate;
pub mod output;
pub mod pipeline;
pub mod prelude;

pub use codec::{CompressedAudio, compress_file, decode, encode};
pub use error::{Error, Result};
pub use locate::locate;
pub use output::{AudioWriter, Clock, SystemClock};
pub use pipeline::recover;
