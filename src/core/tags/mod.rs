//! core/tags/mod.rs
//!
//! The boundary to the binary tag codec.
//! Public API:
//! - [`TagStore`]: read every frame, strip every frame, write a frame list.
//! - [`Id3Store`]: the real thing, backed by the `id3` crate.
//! - [`MemoryStore`]: frames kept in a map, for tests and dry runs.
//!
//! Nothing above this module knows about `id3::Tag`; songs and actions only
//! ever see [`RawFrame`]s, so the codec can be swapped without touching them.

mod markers;
mod memory;
mod read;
mod write;

use std::path::Path;

use tracing::debug;

use super::error::{Result, TagError};
use super::types::{RawFrame, TagVersion};

pub use memory::MemoryStore;

pub trait TagStore {
    /// All frames in file order. A file without a tag yields an empty list.
    fn read_frames(&self, path: &Path) -> Result<Vec<RawFrame>>;

    /// Remove the whole tag from the file.
    fn strip_frames(&self, path: &Path) -> Result<()>;

    /// Write `frames` as a fresh tag, replacing whatever was there.
    fn write_frames(&self, path: &Path, frames: &[RawFrame], version: TagVersion) -> Result<()>;
}

/// [`TagStore`] over real files, using the `id3` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Id3Store;

impl TagStore for Id3Store {
    fn read_frames(&self, path: &Path) -> Result<Vec<RawFrame>> {
        debug!(path = %path.display(), "reading frames");
        read::read_frames(path)
    }

    fn strip_frames(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "stripping tag");
        id3::Tag::remove_from_path(path)
            .map(|_| ())
            .map_err(|source| TagError::Id3 {
                path: path.to_path_buf(),
                source,
            })
    }

    fn write_frames(&self, path: &Path, frames: &[RawFrame], version: TagVersion) -> Result<()> {
        debug!(path = %path.display(), count = frames.len(), "writing frames");
        write::write_frames(path, frames, version)
    }
}
