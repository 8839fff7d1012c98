//! core/tags/markers.rs
//! The text encoding byte of each frame, read straight from the tag bytes.
//!
//! The id3 crate decodes text for us but leaves `Frame::encoding()` empty on
//! frames it reads from a file. That byte is the only thing telling a GBK
//! frame (Latin-1 marker) from a UTF-16 frame whose text happens to be ASCII,
//! so we walk the frame headers ourselves and pick it up.
//!
//! Walk rules:
//! - ID3v2.2: 6-byte frame headers, 3-char ids
//! - ID3v2.3/2.4: 10-byte frame headers, 4-char ids (2.4 sizes are syncsafe)
//! - Whole-tag unsynchronisation (2.2/2.3) is undone before walking
//! - Compressed or encrypted frames yield no marker

use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use id3::Encoding;

use super::super::types::FrameId;

const TAG_HEADER_LEN: usize = 10;

/// Encoding markers keyed by frame id, in file order.
#[derive(Debug, Default)]
pub(super) struct EncodingMarkers {
    by_id: HashMap<FrameId, VecDeque<Option<Encoding>>>,
}

impl EncodingMarkers {
    /// A file without an ID3v2 header has no markers.
    pub(super) fn read(path: &Path) -> io::Result<Self> {
        let mut file = File::open(path)?;

        let mut header = [0u8; TAG_HEADER_LEN];
        if file.read_exact(&mut header).is_err() || &header[..3] != b"ID3" {
            return Ok(Self::default());
        }

        let size = syncsafe(&header[6..10]);
        let mut body = Vec::with_capacity(size);
        file.take(size as u64).read_to_end(&mut body)?;

        Ok(Self::parse(header[3], header[5], body))
    }

    /// The marker of the next not-yet-taken frame with this id.
    pub(super) fn take(&mut self, id: &FrameId) -> Option<Encoding> {
        self.by_id.get_mut(id).and_then(VecDeque::pop_front).flatten()
    }

    fn parse(major: u8, flags: u8, mut body: Vec<u8>) -> Self {
        let mut markers = Self::default();

        if major < 4 && flags & 0x80 != 0 {
            body = resync(&body);
        }

        let mut pos = if major >= 3 && flags & 0x40 != 0 {
            extended_header_len(major, &body)
        } else {
            0
        };

        let header_len = if major == 2 { 6 } else { 10 };

        while pos + header_len <= body.len() {
            let head = &body[pos..pos + header_len];
            if head[0] == 0 {
                break; // padding
            }

            let (id, size, skip, opaque) = if major == 2 {
                let id = String::from_utf8_lossy(&head[..3]).into_owned();
                let size = big_endian(&head[3..6]);
                (id, size, 0, false)
            } else {
                let id = String::from_utf8_lossy(&head[..4]).into_owned();
                let size = if major >= 4 {
                    syncsafe(&head[4..8])
                } else {
                    big_endian(&head[4..8])
                };
                let (skip, opaque) = frame_extras(major, head[9]);
                (id, size, skip, opaque)
            };

            let start = pos + header_len;
            let end = start + size;
            if size == 0 || end > body.len() {
                break;
            }

            if has_encoding_byte(&id) {
                let marker = if opaque {
                    None
                } else {
                    body.get(start + skip).copied().and_then(encoding_from_byte)
                };
                markers
                    .by_id
                    .entry(FrameId::from_id(&id))
                    .or_default()
                    .push_back(marker);
            }

            pos = end;
        }

        markers
    }
}

/// Bytes between the frame header and the content, and whether the content
/// is compressed or encrypted.
fn frame_extras(major: u8, format_flags: u8) -> (usize, bool) {
    if major >= 4 {
        let mut skip = 0;
        if format_flags & 0x40 != 0 {
            skip += 1; // group id
        }
        if format_flags & 0x04 != 0 {
            skip += 1; // encryption method
        }
        if format_flags & 0x01 != 0 {
            skip += 4; // data length indicator
        }
        (skip, format_flags & 0x0C != 0)
    } else {
        let mut skip = 0;
        if format_flags & 0x80 != 0 {
            skip += 4; // decompressed size
        }
        if format_flags & 0x40 != 0 {
            skip += 1;
        }
        if format_flags & 0x20 != 0 {
            skip += 1;
        }
        (skip, format_flags & 0xC0 != 0)
    }
}

fn extended_header_len(major: u8, body: &[u8]) -> usize {
    if body.len() < 4 {
        return body.len();
    }
    if major >= 4 {
        // size includes itself
        syncsafe(&body[..4])
    } else {
        4 + big_endian(&body[..4])
    }
}

/// Frames whose content starts with a text encoding byte.
fn has_encoding_byte(id: &str) -> bool {
    if id.starts_with('T') {
        return true;
    }
    matches!(
        id,
        "COMM" | "USLT" | "SYLT" | "APIC" | "WXXX" | "IPLS" | "GEOB" | "USER" | "OWNE" | "COMR"
            | "COM" | "ULT" | "SLT" | "PIC" | "WXX" | "IPL" | "GEO"
    )
}

fn encoding_from_byte(b: u8) -> Option<Encoding> {
    match b {
        0 => Some(Encoding::Latin1),
        1 => Some(Encoding::UTF16),
        2 => Some(Encoding::UTF16BE),
        3 => Some(Encoding::UTF8),
        _ => None,
    }
}

/// Drop the 0x00 inserted after every 0xFF.
fn resync(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut prev_ff = false;
    for &b in data {
        if !(prev_ff && b == 0) {
            out.push(b);
        }
        prev_ff = b == 0xFF;
    }
    out
}

fn syncsafe(b: &[u8]) -> usize {
    b.iter().fold(0usize, |acc, &x| (acc << 7) | usize::from(x & 0x7F))
}

fn big_endian(b: &[u8]) -> usize {
    b.iter().fold(0usize, |acc, &x| (acc << 8) | usize::from(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_v3(id: &[u8; 4], flags: u8, content: &[u8]) -> Vec<u8> {
        let mut out = id.to_vec();
        out.extend_from_slice(&(content.len() as u32).to_be_bytes());
        out.extend_from_slice(&[0, flags]);
        out.extend_from_slice(content);
        out
    }

    #[test]
    fn v23_text_frames_keep_their_markers() {
        let mut body = frame_v3(b"TIT2", 0, &[1, 0xFF, 0xFE, b'H', 0, b'i', 0]);
        body.extend(frame_v3(b"TPE1", 0, &[0, 0xD6, 0xDC]));
        body.extend(frame_v3(b"TIT2", 0, &[3, b'x']));
        body.extend([0u8; 16]);

        let mut markers = EncodingMarkers::parse(3, 0, body);

        assert_eq!(markers.take(&FrameId::Title), Some(Encoding::UTF16));
        assert_eq!(markers.take(&FrameId::Title), Some(Encoding::UTF8));
        assert_eq!(markers.take(&FrameId::Title), None);
        assert_eq!(markers.take(&FrameId::Artist), Some(Encoding::Latin1));
    }

    #[test]
    fn v24_data_length_indicator_is_skipped() {
        let mut body = b"TRCK".to_vec();
        body.extend([0, 0, 0, 7]); // syncsafe size
        body.extend([0, 0x01]);
        body.extend([0, 0, 0, 2, 1, b'0', b'3']);

        let mut markers = EncodingMarkers::parse(4, 0, body);

        assert_eq!(markers.take(&FrameId::Track), Some(Encoding::UTF16));
    }

    #[test]
    fn v22_ids_map_onto_reserved_frames() {
        let mut body = b"TT2".to_vec();
        body.extend([0, 0, 3, 0, b'a', b'b']);

        let mut markers = EncodingMarkers::parse(2, 0, body);

        assert_eq!(markers.take(&FrameId::Title), Some(Encoding::Latin1));
    }

    #[test]
    fn compressed_frames_have_no_marker() {
        let body = frame_v3(b"TALB", 0x80, &[0, 0, 0, 9, 0x78, 0x9C]);

        let mut markers = EncodingMarkers::parse(3, 0, body);

        assert_eq!(markers.take(&FrameId::Album), None);
    }

    #[test]
    fn unsynchronised_tag_is_resynced_first() {
        assert_eq!(resync(&[0xFF, 0x00, 0xE0, 0x00]), vec![0xFF, 0xE0, 0x00]);

        let mut body = frame_v3(b"TIT2", 0, &[1, 0xFF, 0x00, 0xFE, b'a', 0]);
        // sizes describe the resynced frame
        body[7] = 5;

        let mut markers = EncodingMarkers::parse(3, 0x80, body);

        assert_eq!(markers.take(&FrameId::Title), Some(Encoding::UTF16));
    }

    #[test]
    fn untagged_file_has_no_markers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp3");
        std::fs::write(&path, [0u8; 64]).unwrap();

        let mut markers = EncodingMarkers::read(&path).unwrap();

        assert_eq!(markers.take(&FrameId::Title), None);
    }
}
