//! Error types for flvscope-flv.

use std::io;
use thiserror::Error;

/// Result type for flvscope-flv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for FLV decoding.
///
/// Every variant is fatal: the stream position is no longer trustworthy once
/// one of these is returned, so decoding stops. A clean end of stream is
/// reported as `Ok(None)` by the tag decoder, never as an error.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream does not start with the FLV signature.
    #[error("Invalid FLV signature: expected \"FLV\", found {found:02X?}")]
    Format { found: [u8; 3] },

    /// Short read inside a structure with a fixed or declared length.
    #[error(
        "Truncated stream reading {field} at offset {offset}: need {expected} bytes, have {actual}"
    )]
    TruncatedStream {
        field: &'static str,
        offset: u64,
        expected: usize,
        actual: usize,
    },

    /// Tag type outside Audio/Video/ScriptData.
    #[error("Unknown tag type {tag_type} at offset {offset}")]
    UnknownTagType { tag_type: u8, offset: u64 },

    /// Declared payload size too small for the payload's own sub-header.
    #[error("Invalid {kind} payload size {declared} (minimum {minimum})")]
    InvalidPayloadSize {
        kind: &'static str,
        declared: u32,
        minimum: u32,
    },

    /// The header was requested after decoding had already stopped.
    #[error("Stream already terminated")]
    StreamTerminated,

    /// Payload decoder consumed a different number of bytes than declared.
    #[error("Payload size mismatch: declared {declared}, consumed {consumed}")]
    PayloadSizeMismatch { declared: u32, consumed: u64 },
}

impl Error {
    /// Create a truncated stream error.
    pub fn truncated(field: &'static str, offset: u64, expected: usize, actual: usize) -> Self {
        Self::TruncatedStream {
            field,
            offset,
            expected,
            actual,
        }
    }

    /// Whether this error came from the input ending inside a structure.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedStream { .. })
    }
}
