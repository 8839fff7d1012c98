//! core/song.rs
//! One MP3 file and its frames.
//!
//! Lifecycle:
//! - `load` reads every frame through the `TagStore` (Loaded)
//! - `attach_cover` / `derive_from_filename` change the in-memory tags only (Mutated)
//! - `save` strips the file, writes the reserved tags, then reloads (Loaded again)
//!
//! Save always reloads: after a write the in-memory tags are whatever the
//! store reads back, never what we think we wrote.

use std::path::PathBuf;

use tracing::debug;

use super::charset::Charset;
use super::cover::CoverSource;
use super::error::{Result, TagError};
use super::filename::{DerivedTags, FilenamePattern};
use super::library;
use super::tag::Tag;
use super::tags::TagStore;
use super::types::{CoverImage, FrameId, RawFrame, TagVersion, TextEncoding};

pub struct Song<'a> {
    path: PathBuf,
    tags: Vec<Tag>,
    store: &'a dyn TagStore,
}

impl std::fmt::Debug for Song<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Song")
            .field("path", &self.path)
            .field("tags", &self.tags)
            .finish()
    }
}

impl<'a> Song<'a> {
    pub fn load(path: impl Into<PathBuf>, store: &'a dyn TagStore) -> Result<Self> {
        let mut song = Self {
            path: path.into(),
            tags: Vec::new(),
            store,
        };
        song.reload()?;
        Ok(song)
    }

    /// Replace the in-memory tags with what is on disk.
    pub fn reload(&mut self) -> Result<()> {
        self.tags = self
            .store
            .read_frames(&self.path)?
            .into_iter()
            .map(Tag::from_frame)
            .collect();
        debug!(path = %self.path.display(), tags = self.tags.len(), "loaded song");
        Ok(())
    }

    pub fn file_name(&self) -> String {
        library::file_name(&self.path)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag(&self, id: &FrameId) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id() == id)
    }

    pub fn cover(&self) -> Option<&CoverImage> {
        self.tags.iter().find_map(Tag::cover)
    }

    /// True while any reserved text frame still carries the legacy marker.
    pub fn requires_conversion(&self) -> bool {
        self.tags
            .iter()
            .any(|t| t.is_reserved() && !t.is_cover() && t.encoding() == TextEncoding::Legacy)
    }

    /// Resolve `source` and attach it as the only cover.
    ///
    /// On failure nothing changes.
    pub fn attach_cover(&mut self, source: &str) -> Result<()> {
        let image = CoverSource::parse(source).resolve()?;
        self.attach_cover_image(image);
        Ok(())
    }

    /// Drop every existing cover and append `image`.
    pub fn attach_cover_image(&mut self, image: CoverImage) {
        self.tags.retain(|t| !t.is_cover());
        self.tags.push(Tag::cover_image(image));
    }

    /// Replace all tags with a track number and title taken from the filename.
    ///
    /// On a mismatch the tags are left alone.
    pub fn derive_from_filename(&mut self, pattern: &FilenamePattern) -> Result<DerivedTags> {
        let stem = library::filename_stem(&self.path);
        let derived = pattern
            .parse(&stem)
            .ok_or_else(|| TagError::FilenameMismatch(stem.clone()))?;

        self.tags.clear();
        self.tags
            .push(Tag::unicode_text(FrameId::Track, &derived.track));
        if !derived.title.is_empty() {
            self.tags
                .push(Tag::unicode_text(FrameId::Title, &derived.title));
        }

        Ok(derived)
    }

    /// Strip the file, write back the reserved tags (upgraded to Unicode), reload.
    pub fn save(&mut self, legacy: Charset, version: TagVersion) -> Result<()> {
        let frames: Vec<RawFrame> = self
            .tags
            .iter()
            .filter(|t| t.is_reserved())
            .map(|t| t.to_storage_frame(legacy))
            .collect();

        self.store.strip_frames(&self.path)?;
        self.store.write_frames(&self.path, &frames, version)?;

        self.reload()
    }
}
