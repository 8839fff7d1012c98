//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use mp3tag::core::types::{CoverImage, FrameId, RawFrame, TextEncoding};
use tempfile::TempDir;

/// "周杰伦" in GBK.
pub const JAY_GBK: &[u8] = &[0xD6, 0xDC, 0xBD, 0xDC, 0xC2, 0xD7];

/// "晴天" in BIG5.
pub const SUNNY_BIG5: &[u8] = &[0xB4, 0xB8, 0xA4, 0xD1];

/// A temp dir holding empty files with the given names.
pub fn dir_with(names: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in names {
        touch(&dir.path().join(name));
    }
    dir
}

pub fn touch(path: &Path) {
    std::fs::write(path, b"").unwrap();
}

pub fn legacy(id: FrameId, bytes: &[u8]) -> RawFrame {
    RawFrame::text(id, bytes.to_vec(), TextEncoding::Legacy)
}

pub fn cover(byte: u8) -> RawFrame {
    RawFrame::picture(CoverImage::front("image/jpeg", vec![0xFF, 0xD8, 0xFF, byte]))
}

pub fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

pub fn paths(p: &[&Path]) -> Vec<PathBuf> {
    p.iter().map(|p| p.to_path_buf()).collect()
}
