//! Round trips through the real id3 codec on scratch files.
mod common;

use common::{JAY_GBK, cover, legacy, output};
use mp3tag::core::actions;
use mp3tag::core::charset::{self, Charset};
use mp3tag::core::types::{FrameId, Payload, RawFrame, TagVersion, TextEncoding};
use mp3tag::core::{Id3Store, Settings, Song, TagStore};
use tempfile::TempDir;

/// A file that looks enough like an MP3 for tag IO (no real audio needed).
fn scratch_mp3(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, [0u8; 512]).unwrap();
    path
}

#[test]
fn untagged_file_reads_as_no_frames() {
    let dir = TempDir::new().unwrap();
    let path = scratch_mp3(&dir, "blank.mp3");

    assert!(Id3Store.read_frames(&path).unwrap().is_empty());
    assert!(!Song::load(path, &Id3Store).unwrap().requires_conversion());
}

#[test]
fn legacy_and_unicode_markers_survive_a_write() {
    let dir = TempDir::new().unwrap();
    let path = scratch_mp3(&dir, "a.mp3");

    let frames = vec![
        legacy(FrameId::Artist, JAY_GBK),
        RawFrame::text(FrameId::Title, charset::to_ucs2("晴天"), TextEncoding::Unicode),
        cover(7),
    ];
    Id3Store
        .write_frames(&path, &frames, TagVersion::Id3v23)
        .unwrap();

    let read = Id3Store.read_frames(&path).unwrap();
    assert_eq!(read.len(), 3);

    let artist = read.iter().find(|f| f.id == FrameId::Artist).unwrap();
    assert_eq!(artist.encoding, TextEncoding::Legacy);
    assert_eq!(artist.payload, Payload::Text(JAY_GBK.to_vec()));

    let title = read.iter().find(|f| f.id == FrameId::Title).unwrap();
    assert_eq!(title.encoding, TextEncoding::Unicode);
    assert_eq!(
        charset::to_utf8(
            match &title.payload {
                Payload::Text(b) => b,
                other => panic!("unexpected payload {other:?}"),
            },
            Charset::Ucs2
        ),
        "晴天"
    );

    let image = read.iter().find_map(|f| match &f.payload {
        Payload::Picture(image) => Some(image),
        _ => None,
    });
    assert_eq!(image.unwrap().data, vec![0xFF, 0xD8, 0xFF, 7]);
}

#[test]
fn strip_removes_the_tag() {
    let dir = TempDir::new().unwrap();
    let path = scratch_mp3(&dir, "a.mp3");
    Id3Store
        .write_frames(&path, &[legacy(FrameId::Album, b"Album")], TagVersion::Id3v23)
        .unwrap();
    assert_eq!(Id3Store.read_frames(&path).unwrap().len(), 1);

    Id3Store.strip_frames(&path).unwrap();

    assert!(Id3Store.read_frames(&path).unwrap().is_empty());
}

#[test]
fn convert_on_a_real_file() {
    let dir = TempDir::new().unwrap();
    let path = scratch_mp3(&dir, "track.mp3");
    Id3Store
        .write_frames(
            &path,
            &[
                legacy(FrameId::Artist, JAY_GBK),
                legacy(FrameId::Other("TCON".into()), b"Pop"),
            ],
            TagVersion::Id3v23,
        )
        .unwrap();

    let mut buf = Vec::new();
    let report =
        actions::convert(&Id3Store, &[path.clone()], &Settings::default(), &mut buf).unwrap();
    assert_eq!(report.written, 1, "{}", output(buf));

    let song = Song::load(path.clone(), &Id3Store).unwrap();
    assert!(!song.requires_conversion());
    assert_eq!(song.tags().len(), 1);
    let artist = song.tag(&FrameId::Artist).unwrap();
    assert_eq!(artist.encoding(), TextEncoding::Unicode);
    assert_eq!(artist.text(Charset::Gbk).as_deref(), Some("周杰伦"));
}

#[test]
fn ascii_text_in_unicode_frames_reads_back_as_unicode() {
    let dir = TempDir::new().unwrap();
    let path = scratch_mp3(&dir, "a.mp3");
    let frames = vec![
        RawFrame::text(FrameId::Track, charset::to_ucs2("03"), TextEncoding::Unicode),
        RawFrame::text(FrameId::Title, charset::to_ucs2("Song Title"), TextEncoding::Unicode),
        legacy(FrameId::Album, b"Greatest Hits"),
    ];
    Id3Store
        .write_frames(&path, &frames, TagVersion::Id3v23)
        .unwrap();

    let read = Id3Store.read_frames(&path).unwrap();
    let encoding_of = |id: FrameId| read.iter().find(|f| f.id == id).unwrap().encoding;

    assert_eq!(encoding_of(FrameId::Track), TextEncoding::Unicode);
    assert_eq!(encoding_of(FrameId::Title), TextEncoding::Unicode);
    assert_eq!(encoding_of(FrameId::Album), TextEncoding::Legacy);
}

#[test]
fn convert_twice_on_a_real_file_is_a_no_op_the_second_time() {
    let dir = TempDir::new().unwrap();
    let path = scratch_mp3(&dir, "track.mp3");
    Id3Store
        .write_frames(
            &path,
            &[
                legacy(FrameId::Track, b"03"),
                legacy(FrameId::Title, b"Song Title"),
            ],
            TagVersion::Id3v23,
        )
        .unwrap();

    let mut first = Vec::new();
    let report =
        actions::convert(&Id3Store, &[path.clone()], &Settings::default(), &mut first).unwrap();
    assert_eq!(report.written, 1, "{}", output(first));

    let mut second = Vec::new();
    let report =
        actions::convert(&Id3Store, &[path.clone()], &Settings::default(), &mut second).unwrap();
    assert_eq!(report.written, 0);
    assert_eq!(report.skipped, 1);
    assert!(output(second).contains("No need to convert"));
}

#[test]
fn fname_output_needs_no_conversion() {
    let dir = TempDir::new().unwrap();
    let path = scratch_mp3(&dir, "03. Song Title.mp3");

    let mut buf = Vec::new();
    let report =
        actions::derive_from_filename(&Id3Store, &[path.clone()], &Settings::default(), &mut buf)
            .unwrap();
    assert_eq!(report.written, 1, "{}", output(buf));

    let song = Song::load(path.clone(), &Id3Store).unwrap();
    assert!(!song.requires_conversion());
    assert_eq!(
        song.tag(&FrameId::Title).unwrap().text(Charset::Gbk).as_deref(),
        Some("Song Title")
    );
}

#[test]
fn v24_year_reads_back_as_unicode() {
    let dir = TempDir::new().unwrap();
    let path = scratch_mp3(&dir, "a.mp3");
    Id3Store
        .write_frames(&path, &[legacy(FrameId::Year, b"1999")], TagVersion::Id3v23)
        .unwrap();

    let settings = Settings {
        version: TagVersion::Id3v24,
        ..Settings::default()
    };
    let mut buf = Vec::new();
    actions::convert(&Id3Store, &[path.clone()], &settings, &mut buf).unwrap();

    let mut info = Vec::new();
    actions::info(&Id3Store, &[path.clone()], &settings, &mut info).unwrap();
    assert!(output(info).contains("[UNICODE] 1999"));
}
