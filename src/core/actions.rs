//! core/actions.rs
//! The four verbs: info, convert, attach-cover, derive-from-filename.
//!
//! Every action:
//! - resolves its input paths to MP3 files (bad paths are reported, not fatal)
//! - walks the songs one at a time, in order
//! - writes human-readable progress into `out` (stdout for the CLI, a buffer for the web)
//! - returns a `BatchReport` with the counts

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{info, warn};

use super::config::Settings;
use super::cover::CoverSource;
use super::error::TagError;
use super::library;
use super::song::Song;
use super::tags::TagStore;
use super::types::Payload;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// Songs the action got to look at.
    pub songs: usize,
    /// Songs written back to disk.
    pub written: usize,
    /// Songs that needed nothing.
    pub skipped: usize,
    /// Songs that could not be read, parsed or written.
    pub failed: usize,
    /// The batch stopped before touching any song.
    pub aborted: bool,
}

/// Expand every input path into MP3 files, reporting the ones that are neither.
pub fn collect_songs(paths: &[PathBuf], out: &mut dyn Write) -> io::Result<Vec<PathBuf>> {
    let mut songs = Vec::new();
    for path in paths {
        match library::resolve_mp3s(path) {
            Ok(found) => songs.extend(found),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping path");
                writeln!(out, "Invalid song file: {}", path.display())?;
            }
        }
    }
    Ok(songs)
}

/// Print every frame of every song.
pub fn info(
    store: &dyn TagStore,
    paths: &[PathBuf],
    settings: &Settings,
    out: &mut dyn Write,
) -> io::Result<BatchReport> {
    let mut report = BatchReport::default();

    for path in collect_songs(paths, out)? {
        report.songs += 1;
        display_song_filename(&path, out)?;

        let song = match Song::load(path.clone(), store) {
            Ok(s) => s,
            Err(e) => {
                report_failure(&mut report, &e, out)?;
                continue;
            }
        };

        for tag in song.tags() {
            writeln!(out, "{}", tag.description())?;
            let shown = match tag.payload() {
                Payload::Text(_) => tag.text(settings.legacy).unwrap_or_default(),
                Payload::Picture(image) => {
                    format!("<{}, {} bytes>", image.mime_type, image.data.len())
                }
                Payload::Opaque => "<binary>".to_string(),
            };
            writeln!(out, "[{}] {}", tag.encoding().label(), shown)?;
        }
        writeln!(out)?;
    }

    Ok(report)
}

/// Upgrade legacy-encoded reserved frames to Unicode. Songs already in Unicode are not touched.
pub fn convert(
    store: &dyn TagStore,
    paths: &[PathBuf],
    settings: &Settings,
    out: &mut dyn Write,
) -> io::Result<BatchReport> {
    let mut report = BatchReport::default();

    for path in collect_songs(paths, out)? {
        report.songs += 1;
        display_song_filename(&path, out)?;

        let result = Song::load(path.clone(), store).and_then(|mut song| {
            if !song.requires_conversion() {
                return Ok(false);
            }
            song.save(settings.legacy, settings.version)?;
            Ok(true)
        });

        match result {
            Ok(true) => {
                info!(path = %path.display(), charset = %settings.legacy, "converted");
                report.written += 1;
                writeln!(out, "Done!")?;
                writeln!(out)?;
            }
            Ok(false) => {
                report.skipped += 1;
                writeln!(out, "No need to convert")?;
                writeln!(out)?;
            }
            Err(e) => report_failure(&mut report, &e, out)?,
        }
    }

    Ok(report)
}

/// Attach one cover to every song.
///
/// The cover is resolved once, up front. If it cannot be resolved the whole
/// batch stops before any song is touched.
pub fn attach_cover(
    store: &dyn TagStore,
    paths: &[PathBuf],
    cover: &str,
    settings: &Settings,
    out: &mut dyn Write,
) -> io::Result<BatchReport> {
    let mut report = BatchReport::default();

    let source = CoverSource::parse(cover);
    let image = match source.resolve() {
        Ok(image) => image,
        Err(e) => {
            warn!(%source, error = %e, "cover unavailable, aborting batch");
            writeln!(out, "Invalid cover image: {cover}")?;
            report.aborted = true;
            return Ok(report);
        }
    };

    for path in collect_songs(paths, out)? {
        report.songs += 1;
        display_song_filename(&path, out)?;

        let result = Song::load(path.clone(), store).and_then(|mut song| {
            song.attach_cover_image(image.clone());
            song.save(settings.legacy, settings.version)
        });

        match result {
            Ok(()) => {
                report.written += 1;
                writeln!(out, "Done!")?;
                writeln!(out)?;
            }
            Err(e) => report_failure(&mut report, &e, out)?,
        }
    }

    Ok(report)
}

/// Rewrite track number and title from each song's filename.
pub fn derive_from_filename(
    store: &dyn TagStore,
    paths: &[PathBuf],
    settings: &Settings,
    out: &mut dyn Write,
) -> io::Result<BatchReport> {
    let mut report = BatchReport::default();

    for path in collect_songs(paths, out)? {
        report.songs += 1;
        display_song_filename(&path, out)?;

        let result = Song::load(path.clone(), store).and_then(|mut song| {
            song.derive_from_filename(&settings.pattern)?;
            song.save(settings.legacy, settings.version)
        });

        match result {
            Ok(()) => {
                report.written += 1;
                writeln!(out, "Done!")?;
            }
            Err(TagError::FilenameMismatch(stem)) => {
                warn!(%stem, "filename has no leading track number");
                report.failed += 1;
                writeln!(out, "Failed to parse...")?;
            }
            Err(e) => {
                report.failed += 1;
                writeln!(out, "Failed: {e}")?;
            }
        }
        writeln!(out)?;
    }

    Ok(report)
}

fn display_song_filename(path: &std::path::Path, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Song: {}", library::file_name(path))?;
    writeln!(out)
}

fn report_failure(report: &mut BatchReport, e: &TagError, out: &mut dyn Write) -> io::Result<()> {
    warn!(error = %e, "song failed");
    report.failed += 1;
    writeln!(out, "Failed: {e}")?;
    writeln!(out)
}
