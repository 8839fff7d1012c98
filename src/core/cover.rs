//! core/cover.rs
//! Turn a cover source (local path or http/https URL) into image bytes.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use url::Url;

use super::error::CoverError;
use super::types::CoverImage;

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Where a cover comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverSource {
    Local(PathBuf),
    Remote(Url),
}

impl CoverSource {
    /// Anything that parses as an http(s) URL is remote, everything else is a path.
    pub fn parse(source: &str) -> Self {
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => CoverSource::Remote(url),
            _ => CoverSource::Local(super::library::expand_home(source)),
        }
    }

    /// Fetch/read the bytes. Blocks the calling thread; no timeout.
    pub fn resolve(&self) -> Result<CoverImage, CoverError> {
        match self {
            CoverSource::Local(path) => read_local(path),
            CoverSource::Remote(url) => fetch_remote(url),
        }
    }
}

impl std::fmt::Display for CoverSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverSource::Local(path) => write!(f, "{}", path.display()),
            CoverSource::Remote(url) => write!(f, "{url}"),
        }
    }
}

fn read_local(path: &Path) -> Result<CoverImage, CoverError> {
    if !path.is_file() {
        return Err(CoverError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| CoverError::UnsupportedImage(path.to_path_buf()))?;

    let data = std::fs::read(path).map_err(|source| CoverError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if data.is_empty() {
        return Err(CoverError::Empty(path.display().to_string()));
    }

    debug!(path = %path.display(), bytes = data.len(), "read cover");
    let mime = detect_mime_type(&data).unwrap_or_else(|| mime_for_extension(&ext));
    Ok(CoverImage::front(mime, data))
}

fn fetch_remote(url: &Url) -> Result<CoverImage, CoverError> {
    info!(%url, "downloading cover");

    let fetch_err = |source| CoverError::Fetch {
        url: url.to_string(),
        source,
    };

    let resp = reqwest::blocking::get(url.clone()).map_err(fetch_err)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(CoverError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let header_mime = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| v.starts_with("image/"))
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string());

    let data = resp.bytes().map_err(fetch_err)?.to_vec();
    if data.is_empty() {
        return Err(CoverError::Empty(url.to_string()));
    }

    let mime = detect_mime_type(&data)
        .map(str::to_string)
        .or(header_mime)
        .unwrap_or_else(|| "image/jpeg".to_string());
    Ok(CoverImage::front(mime, data))
}

/// Sniff the image type from its magic bytes.
pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        Some("image/png")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else {
        None
    }
}

fn mime_for_extension(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_remote_paths_are_local() {
        assert!(matches!(
            CoverSource::parse("http://example.com/a.jpg"),
            CoverSource::Remote(_)
        ));
        assert!(matches!(
            CoverSource::parse("https://example.com/a.jpg"),
            CoverSource::Remote(_)
        ));
        assert!(matches!(
            CoverSource::parse("ftp://example.com/a.jpg"),
            CoverSource::Local(_)
        ));
        assert_eq!(
            CoverSource::parse("covers/a.jpg"),
            CoverSource::Local(PathBuf::from("covers/a.jpg"))
        );
    }

    #[test]
    fn reads_local_image_and_sniffs_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.JPG");
        std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]).unwrap();

        let image = CoverSource::Local(path).resolve().unwrap();
        // content wins over the extension
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.picture_type, CoverImage::FRONT_COVER);
        assert_eq!(image.data.len(), 6);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = CoverSource::Local(dir.path().join("nope.jpg"))
            .resolve()
            .unwrap_err();
        assert!(matches!(err, CoverError::NotFound(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = CoverSource::Local(path).resolve().unwrap_err();
        assert!(matches!(err, CoverError::UnsupportedImage(_)));
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.jpg");
        std::fs::write(&path, b"").unwrap();

        assert!(matches!(
            CoverSource::Local(path).resolve().unwrap_err(),
            CoverError::Empty(_)
        ));
    }
}
