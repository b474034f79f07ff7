//! In-memory load and save on the arena itself.

use iwacad_arena::GeometryArena;

use crate::error::CodecError;
use crate::reader::load_into;
use crate::report::LoadReport;
use crate::writer::save_arena;

/// Byte-buffer serialization for [`GeometryArena`].
pub trait ArenaCodecExt {
    /// Clear the arena and decode `bytes` into it.
    ///
    /// An empty slice is a valid stream with no records.
    fn load_from_bytes(&mut self, bytes: &[u8]) -> Result<LoadReport, CodecError>;

    /// Encode every live record into a new buffer.
    fn save_to_bytes(&self) -> Result<Vec<u8>, CodecError>;
}

impl ArenaCodecExt for GeometryArena {
    fn load_from_bytes(&mut self, bytes: &[u8]) -> Result<LoadReport, CodecError> {
        self.clear();
        load_into(self, bytes)
    }

    fn save_to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        save_arena(self, &mut buf)?;
        Ok(buf)
    }
}
