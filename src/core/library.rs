//! core/library.rs
//! Resolve what the user typed into a list of MP3 files.
//!
//! - A file must end in `.mp3` (any case)
//! - A directory expands to its immediate `.mp3` children (no recursion), sorted

use std::path::{Path, PathBuf};

use super::error::{Result, TagError};

pub fn resolve_mp3s(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() && is_mp3(path) {
        return Ok(vec![path.to_path_buf()]);
    }

    if path.is_dir() {
        let entries = std::fs::read_dir(path).map_err(|source| TagError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| TagError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let child = entry.path();
            if child.is_file() && is_mp3(&child) {
                out.push(child);
            }
        }
        out.sort();
        return Ok(out);
    }

    Err(TagError::InvalidSong(path.to_path_buf()))
}

pub fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

/// `~` and `~/...` expand to `$HOME`; everything else is taken literally.
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return PathBuf::from(raw),
    };

    match std::env::var_os("HOME") {
        Some(home) => {
            let mut p = PathBuf::from(home);
            let rest = rest.trim_start_matches('/');
            if !rest.is_empty() {
                p.push(rest);
            }
            p
        }
        None => PathBuf::from(raw),
    }
}

/// Gets the filename without extension.
/// Ex: '03. Song.mp3' -> '03. Song'
pub fn filename_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Gets the filename with extension, for progress output.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
