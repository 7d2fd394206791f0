//! Convenience re-exports for common voxpack usage.

pub use crate::codec::{CompressedAudio, compress_file, decode, encode};
pub use crate::error::{DecodeError, EncodeError, Error, LocateError, OutputError, Result};
pub use crate::locate::{Payload, locate};
pub use crate::output::{AudioWriter, Clock, SystemClock};
pub use crate::pipeline::recover;
