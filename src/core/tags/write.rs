//! Write `RawFrame`s back to an MP3 as a fresh ID3v2 tag.

use std::path::Path;

use id3::frame::{Content, Picture, PictureType};
use id3::{Encoding, Frame, Tag, TagLike, Version};

use super::super::charset::{self, Charset};
use super::super::error::{Result, TagError};
use super::super::types::{Payload, RawFrame, TagVersion, TextEncoding};

/// Replace the file's tag with exactly `frames`.
///
/// Opaque frames carry nothing we can re-encode and are skipped.
pub(super) fn write_frames(path: &Path, frames: &[RawFrame], version: TagVersion) -> Result<()> {
    let mut tag = Tag::new();

    for raw in frames {
        if let Some(frame) = id3_frame(raw) {
            let _ = tag.add_frame(frame); // returns the replaced frame, if any
        }
    }

    if tag.frames().next().is_none() {
        // nothing to write; an empty tag is the same as no tag
        return Ok(());
    }

    tag.write_to_path(path, id3_version(version))
        .map_err(|source| TagError::Id3 {
            path: path.to_path_buf(),
            source,
        })
}

fn id3_frame(raw: &RawFrame) -> Option<Frame> {
    let encoding = match raw.encoding {
        TextEncoding::Legacy => Encoding::Latin1,
        TextEncoding::Unicode => Encoding::UTF16,
    };

    let content = match &raw.payload {
        Payload::Text(bytes) => {
            let from = match raw.encoding {
                // chars U+0000..=U+00FF round-trip to the same bytes through Latin-1
                TextEncoding::Legacy => Charset::Latin1,
                TextEncoding::Unicode => Charset::Ucs2,
            };
            Content::Text(charset::to_utf8(bytes, from))
        }
        Payload::Picture(image) => Content::Picture(Picture {
            mime_type: image.mime_type.clone(),
            picture_type: picture_type(image.picture_type),
            description: image.description.clone(),
            data: image.data.clone(),
        }),
        Payload::Opaque => return None,
    };

    Some(Frame::with_content(raw.id.as_str(), content).set_encoding(Some(encoding)))
}

fn picture_type(b: u8) -> PictureType {
    match b {
        0 => PictureType::Other,
        1 => PictureType::Icon,
        2 => PictureType::OtherIcon,
        3 => PictureType::CoverFront,
        4 => PictureType::CoverBack,
        5 => PictureType::Leaflet,
        6 => PictureType::Media,
        other => PictureType::Undefined(other),
    }
}

fn id3_version(v: TagVersion) -> Version {
    match v {
        TagVersion::Id3v23 => Version::Id3v23,
        TagVersion::Id3v24 => Version::Id3v24,
    }
}
