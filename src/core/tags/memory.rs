//! core/tags/memory.rs
//! A `TagStore` that keeps frames in a map instead of inside files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::super::error::Result;
use super::super::types::{RawFrame, TagVersion};
use super::TagStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    files: HashMap<PathBuf, Vec<RawFrame>>,
    writes: usize,
    last_version: Option<TagVersion>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file's frames (as if it had been tagged elsewhere).
    pub fn insert(&self, path: impl Into<PathBuf>, frames: Vec<RawFrame>) {
        self.lock().files.insert(path.into(), frames);
    }

    pub fn frames(&self, path: &Path) -> Vec<RawFrame> {
        self.lock().files.get(path).cloned().unwrap_or_default()
    }

    /// How many times `write_frames` was called, across all files.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    pub fn last_version(&self) -> Option<TagVersion> {
        self.lock().last_version
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TagStore for MemoryStore {
    fn read_frames(&self, path: &Path) -> Result<Vec<RawFrame>> {
        Ok(self.frames(path))
    }

    fn strip_frames(&self, path: &Path) -> Result<()> {
        self.lock().files.remove(path);
        Ok(())
    }

    fn write_frames(&self, path: &Path, frames: &[RawFrame], version: TagVersion) -> Result<()> {
        let mut inner = self.lock();
        inner.writes += 1;
        inner.last_version = Some(version);
        inner.files.insert(path.to_path_buf(), frames.to_vec());
        Ok(())
    }
}
