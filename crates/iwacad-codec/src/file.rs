//! Loading and saving geometry files on disk.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use iwacad_arena::GeometryArena;
use tracing::info;

use crate::error::CodecError;
use crate::reader::load_into;
use crate::report::{LoadReport, SaveReport};
use crate::writer::save_arena;

/// Clear `arena` and load the file at `path` into it.
///
/// The arena is cleared before the file is opened, so every failure
/// leaves it either empty or partially loaded. A zero-length file is
/// [`CodecError::Empty`], unlike an empty in-memory buffer.
pub fn load_file(path: impl AsRef<Path>, arena: &mut GeometryArena) -> Result<LoadReport, CodecError> {
    let path = path.as_ref();
    arena.clear();
    let file = File::open(path).map_err(|source| CodecError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let len = file.metadata()?.len();
    if len == 0 {
        return Err(CodecError::Empty {
            path: path.to_path_buf(),
        });
    }
    info!(path = %path.display(), bytes = len, "loading geometry file");
    load_into(arena, BufReader::new(file))
}

/// Write every live record of `arena` to `path`, replacing the file.
pub fn save_file(path: impl AsRef<Path>, arena: &GeometryArena) -> Result<SaveReport, CodecError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| CodecError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "saving geometry file");
    save_arena(arena, BufWriter::new(file))
}
