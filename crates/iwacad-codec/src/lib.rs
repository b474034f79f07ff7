//! Reader and writer for the legacy iwacad tagged-record geometry format.
//!
//! # Format
//!
//! A file is a flat sequence of records with no header, footer, or
//! length prefix; it ends at end of file.
//!
//! ```text
//! [tag u8] [index i16 BE] [payload]   repeated until EOF
//!
//! tag 0  object   payload 40 bytes
//! tag 1  polygon  payload 14 bytes
//! tag 2  point    payload 32 bytes
//! ```
//!
//! Records may appear in any order and later records overwrite earlier
//! ones at the same slot. See [`layout`] for payload fields and
//! [`disambiguate`] for how legacy index encodings are recovered.
//!
//! # Failure handling
//!
//! - End of stream before a tag byte ends the load successfully.
//! - An unknown tag or a stream ending inside a record aborts with a
//!   [`CodecError`]; [`CodecError::kind`] separates open, format, and
//!   truncation failures.
//! - A record whose index is out of range under every interpretation is
//!   skipped and listed in [`LoadReport::skipped`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod disambiguate;
pub mod error;
pub mod ext;
pub mod file;
pub mod layout;
pub mod reader;
pub mod report;
pub mod writer;

pub use disambiguate::{resolve_index, IndexHypothesis, Resolved};
pub use error::{CodecError, FailureKind};
pub use ext::ArenaCodecExt;
pub use file::{load_file, save_file};
pub use layout::RecordTag;
pub use reader::{load_into, CadReader, DecodedRecord, Payload, Records};
pub use report::{LoadReport, ResolutionTally, SaveReport, SkippedRecord};
pub use writer::{save_arena, CadWriter};
