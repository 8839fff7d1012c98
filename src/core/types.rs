//! Core data types shared between the tag store, the song model and the front doors.
//!
//! Rule of thumb:
//! - These are "boring bags of data"
//! - No filesystem code
//! - No id3 crate types (those stay behind `core::tags`)
//!
//! `RawFrame` is what a `TagStore` hands over: one frame as it sits in the file,
//! text still in its on-disk bytes.

use std::fmt;

/// Frame identifier.
///
/// The six named variants are the "reserved" frames we display, convert and
/// rewrite. Everything else is carried as `Other` and dropped on save.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameId {
    Title,
    Artist,
    Album,
    Year,
    Track,
    Cover,
    Other(String),
}

impl FrameId {
    /// Map an ID3v2.3/2.4 (or old 2.2 three-letter) id onto a `FrameId`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "TIT2" | "TT2" => FrameId::Title,
            "TPE1" | "TP1" => FrameId::Artist,
            "TALB" | "TAL" => FrameId::Album,
            "TYER" | "TYE" => FrameId::Year,
            "TRCK" | "TRK" => FrameId::Track,
            "APIC" | "PIC" => FrameId::Cover,
            other => FrameId::Other(other.to_string()),
        }
    }

    /// The ID3v2.3 id written to disk.
    pub fn as_str(&self) -> &str {
        match self {
            FrameId::Title => "TIT2",
            FrameId::Artist => "TPE1",
            FrameId::Album => "TALB",
            FrameId::Year => "TYER",
            FrameId::Track => "TRCK",
            FrameId::Cover => "APIC",
            FrameId::Other(id) => id,
        }
    }

    pub fn is_reserved(&self) -> bool {
        !matches!(self, FrameId::Other(_))
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The frame's text encoding marker, collapsed to the two cases we care about.
///
/// - `Legacy`: ID3 "ISO-8859-1" marker. In practice the bytes are often GBK/BIG5.
/// - `Unicode`: any of the UTF-16/UTF-8 markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Legacy,
    Unicode,
}

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Legacy => "ASCII",
            TextEncoding::Unicode => "UNICODE",
        }
    }
}

/// An embedded (or about to be embedded) picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub mime_type: String,
    /// ID3 picture type byte. 3 = front cover.
    pub picture_type: u8,
    pub description: String,
    pub data: Vec<u8>,
}

impl CoverImage {
    pub const FRONT_COVER: u8 = 3;

    pub fn front(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            picture_type: Self::FRONT_COVER,
            description: "Album cover".to_string(),
            data,
        }
    }
}

/// What a frame carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Text bytes in the frame's own encoding:
    /// - `Legacy` -> the raw single/double-byte string
    /// - `Unicode` -> UCS-2 (little-endian, no BOM)
    Text(Vec<u8>),
    Picture(CoverImage),
    /// A frame we neither display as text nor rewrite (popularimeter, private data...).
    Opaque,
}

/// One frame as read from / written to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub id: FrameId,
    pub payload: Payload,
    pub encoding: TextEncoding,
}

impl RawFrame {
    pub fn text(id: FrameId, bytes: Vec<u8>, encoding: TextEncoding) -> Self {
        Self {
            id,
            payload: Payload::Text(bytes),
            encoding,
        }
    }

    pub fn picture(image: CoverImage) -> Self {
        Self {
            id: FrameId::Cover,
            payload: Payload::Picture(image),
            encoding: TextEncoding::Legacy,
        }
    }
}

/// ID3v2 revision used when writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagVersion {
    #[default]
    Id3v23,
    Id3v24,
}
