//! core/tag.rs
//! One ID3 frame, viewed either as display text or as the frame we will store.

use super::charset::{self, Charset};
use super::types::{CoverImage, FrameId, Payload, RawFrame, TextEncoding};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    frame: RawFrame,
}

impl Tag {
    pub fn from_frame(frame: RawFrame) -> Self {
        Self { frame }
    }

    /// A fresh Unicode text tag (used when deriving tags from a filename).
    pub fn unicode_text(id: FrameId, text: &str) -> Self {
        Self::from_frame(RawFrame::text(
            id,
            charset::to_ucs2(text),
            TextEncoding::Unicode,
        ))
    }

    pub fn cover_image(image: CoverImage) -> Self {
        Self::from_frame(RawFrame::picture(image))
    }

    pub fn id(&self) -> &FrameId {
        &self.frame.id
    }

    pub fn encoding(&self) -> TextEncoding {
        self.frame.encoding
    }

    pub fn payload(&self) -> &Payload {
        &self.frame.payload
    }

    pub fn is_reserved(&self) -> bool {
        self.frame.id.is_reserved()
    }

    pub fn is_cover(&self) -> bool {
        self.frame.id == FrameId::Cover
    }

    pub fn cover(&self) -> Option<&CoverImage> {
        match &self.frame.payload {
            Payload::Picture(image) => Some(image),
            _ => None,
        }
    }

    /// Text as UTF-8.
    ///
    /// - Legacy bytes are read through `legacy` (the operator's GBK/BIG5 guess)
    /// - Unicode bytes are read as UCS-2
    /// - Pictures and opaque frames have no text
    pub fn text(&self, legacy: Charset) -> Option<String> {
        let Payload::Text(bytes) = &self.frame.payload else {
            return None;
        };

        let from = match self.frame.encoding {
            TextEncoding::Legacy => legacy,
            TextEncoding::Unicode => Charset::Ucs2,
        };
        Some(charset::to_utf8(bytes, from))
    }

    /// The frame to write back.
    ///
    /// - Text frames are always upgraded to Unicode (legacy bytes go through `legacy` -> UCS-2)
    /// - Covers are always written with the single-byte marker
    pub fn to_storage_frame(&self, legacy: Charset) -> RawFrame {
        if self.is_cover() {
            return RawFrame {
                encoding: TextEncoding::Legacy,
                ..self.frame.clone()
            };
        }

        let payload = match (&self.frame.payload, self.frame.encoding) {
            (Payload::Text(bytes), TextEncoding::Legacy) => {
                Payload::Text(charset::convert(bytes, legacy, Charset::Ucs2))
            }
            (payload, _) => payload.clone(),
        };

        RawFrame {
            id: self.frame.id.clone(),
            payload,
            encoding: TextEncoding::Unicode,
        }
    }

    /// Human-readable frame name, e.g. "Lead performer(s)/Soloist(s) (TPE1)".
    pub fn description(&self) -> String {
        let id = self.frame.id.as_str();
        match frame_name(id) {
            Some(name) => format!("{name} ({id})"),
            None => format!("({id})"),
        }
    }
}

fn frame_name(id: &str) -> Option<&'static str> {
    let name = match id {
        "TIT2" => "Title/songname/content description",
        "TPE1" => "Lead performer(s)/Soloist(s)",
        "TALB" => "Album/Movie/Show title",
        "TYER" => "Year",
        "TRCK" => "Track number/Position in set",
        "APIC" => "Attached picture",
        "COMM" => "Comments",
        "TCON" => "Content type",
        "TCOM" => "Composer",
        "TCOP" => "Copyright message",
        "TDRC" => "Recording time",
        "TENC" => "Encoded by",
        "TIT1" => "Content group description",
        "TIT3" => "Subtitle/Description refinement",
        "TLEN" => "Length",
        "TPE2" => "Band/orchestra/accompaniment",
        "TPOS" => "Part of a set",
        "TPUB" => "Publisher",
        "TSSE" => "Software/Hardware and settings used for encoding",
        "TXXX" => "User defined text information",
        "USLT" => "Unsynchronized lyric/text transcription",
        "WXXX" => "User defined URL link",
        "POPM" => "Popularimeter",
        "PCNT" => "Play counter",
        "PRIV" => "Private frame",
        "GEOB" => "General encapsulated object",
        _ => return None,
    };
    Some(name)
}
