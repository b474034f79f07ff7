//! Error types for the codec.

use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse failure category, for callers that report load and save
/// failures without matching on every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The file could not be opened or created.
    Open,
    /// The bytes are not a stream this codec understands.
    Format,
    /// The stream ended inside a record.
    Truncation,
    /// Any other read or write failure.
    Io,
}

/// Errors that abort a load or save.
///
/// Records whose index cannot be resolved are not errors; they are
/// listed in [`LoadReport::skipped`](crate::LoadReport::skipped).
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file could not be opened for reading or created for writing.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        /// The path that failed.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The file exists but holds no bytes.
    #[error("{} is empty", .path.display())]
    Empty {
        /// The empty file.
        path: PathBuf,
    },

    /// A tag byte outside `0..=2`. The stream position can no longer be
    /// trusted, so decoding stops.
    #[error(
        "unknown record tag {tag:#04x} at byte {offset} (expected 0=object, 1=polygon, 2=point); next bytes: {}",
        hex_dump(.following)
    )]
    UnknownTag {
        /// Byte offset of the tag.
        offset: u64,
        /// The tag value.
        tag: u8,
        /// Up to 16 bytes that followed the tag.
        following: Vec<u8>,
    },

    /// The stream ended part way through a record.
    #[error("truncated {what} at byte {offset}: expected {expected} bytes, got {got}")]
    Truncated {
        /// Byte offset of the record's tag.
        offset: u64,
        /// The part being read.
        what: &'static str,
        /// Bytes required.
        expected: usize,
        /// Bytes available before end of stream.
        got: usize,
    },

    /// An I/O error occurred during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    /// The failure category.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Open { .. } => FailureKind::Open,
            Self::Empty { .. } | Self::UnknownTag { .. } => FailureKind::Format,
            Self::Truncated { .. } => FailureKind::Truncation,
            Self::Io(_) => FailureKind::Io,
        }
    }
}

/// Space-separated upper-case hex, `"(none)"` for an empty slice.
pub fn hex_dump(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "(none)".to_owned();
    }
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02X}");
    }
    out
}
