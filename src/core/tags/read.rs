//! core/tags/read.rs
//! Read ID3 frames from an MP3 and turn them into `RawFrame`s.
//!
//! The id3 crate hands us decoded `String`s. For Latin-1 marked frames every
//! char is a single byte (U+0000..=U+00FF), so mapping chars back to bytes
//! recovers exactly what sits in the file: usually GBK/BIG5 in disguise.
//!
//! The encoding marker itself comes from `markers`, not from the id3 crate.

use std::path::Path;

use id3::frame::{Content, PictureType};
use id3::{Encoding, Frame, Tag};

use super::super::charset::{self, Charset};
use super::super::error::{Result, TagError};
use super::super::types::{CoverImage, FrameId, Payload, RawFrame, TextEncoding};
use super::markers::EncodingMarkers;

pub(super) fn read_frames(path: &Path) -> Result<Vec<RawFrame>> {
    let tag = match Tag::read_from_path(path) {
        Ok(t) => t,
        Err(id3::Error {
            kind: id3::ErrorKind::NoTag,
            ..
        }) => return Ok(Vec::new()),
        Err(source) => {
            return Err(TagError::Id3 {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut markers = EncodingMarkers::read(path).map_err(|source| TagError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(tag
        .frames()
        .map(|frame| {
            let marker = markers
                .take(&FrameId::from_id(frame.id()))
                .or(frame.encoding());
            raw_frame(frame, marker)
        })
        .collect())
}

fn raw_frame(frame: &Frame, marker: Option<Encoding>) -> RawFrame {
    let id = FrameId::from_id(frame.id());

    let payload_text = |s: &str| -> (Payload, TextEncoding) {
        let encoding = text_encoding(marker, s);
        let bytes = match encoding {
            TextEncoding::Legacy => charset::encode(s, Charset::Latin1),
            TextEncoding::Unicode => charset::to_ucs2(s),
        };
        (Payload::Text(bytes), encoding)
    };

    let (payload, encoding) = match frame.content() {
        Content::Text(s) => payload_text(s),
        Content::Link(s) => payload_text(s),
        Content::Comment(c) => payload_text(&c.text),
        Content::Lyrics(l) => payload_text(&l.text),
        Content::ExtendedText(et) => payload_text(&et.value),
        Content::Picture(p) => (
            Payload::Picture(CoverImage {
                mime_type: p.mime_type.clone(),
                picture_type: picture_type_byte(p.picture_type),
                description: p.description.clone(),
                data: p.data.clone(),
            }),
            text_encoding(marker, &p.description),
        ),
        _ => (Payload::Opaque, TextEncoding::Legacy),
    };

    RawFrame {
        id,
        payload,
        encoding,
    }
}

/// Collapse the encoding marker.
/// Frames without one (compressed, encrypted, URL links) are classified by content.
fn text_encoding(marker: Option<Encoding>, text: &str) -> TextEncoding {
    match marker {
        Some(Encoding::Latin1) => TextEncoding::Legacy,
        Some(_) => TextEncoding::Unicode,
        None if text.chars().all(|c| (c as u32) <= 0xFF) => TextEncoding::Legacy,
        None => TextEncoding::Unicode,
    }
}

fn picture_type_byte(t: PictureType) -> u8 {
    match t {
        PictureType::Other => 0,
        PictureType::Icon => 1,
        PictureType::OtherIcon => 2,
        PictureType::CoverFront => 3,
        PictureType::CoverBack => 4,
        PictureType::Leaflet => 5,
        PictureType::Media => 6,
        PictureType::Undefined(b) => b,
        _ => 0,
    }
}
