//! core/error.rs
//! Error types for the tag store, songs, and cover sources.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TagError>;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: id3 error: {source}")]
    Id3 {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("invalid song file: {0}")]
    InvalidSong(PathBuf),

    #[error("failed to parse filename: {0}")]
    FilenameMismatch(String),

    #[error("cover error: {0}")]
    Cover(#[from] CoverError),
}

/// Why a cover source could not be turned into image bytes.
#[derive(Debug, Error)]
pub enum CoverError {
    #[error("{0} does not exist")]
    NotFound(PathBuf),

    #[error("{0} is not a supported image (jpg, jpeg, png, gif)")]
    UnsupportedImage(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{0} is empty")]
    Empty(String),
}
