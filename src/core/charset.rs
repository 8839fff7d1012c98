//! core/charset.rs
//! Best-effort byte string conversion between the charsets we meet in ID3 frames.
//!
//! - Legacy (GBK / BIG5) tables come from `encoding_rs`
//! - UCS-2 here means little-endian UTF-16 code units, no BOM, BMP only
//! - Nothing in this module fails: malformed input is repaired with U+FFFD,
//!   unrepresentable output is substituted

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use encoding_rs::{BIG5, GBK, UTF_16LE};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    Gbk,
    Big5,
    Utf8,
    Ucs2,
    Latin1,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CharsetError {
    #[error("unknown charset: {0}")]
    Unknown(String),

    #[error("{0} is not a legacy charset (expected gbk, big5 or latin1)")]
    NotLegacy(Charset),
}

impl Charset {
    pub fn name(self) -> &'static str {
        match self {
            Charset::Gbk => "GBK",
            Charset::Big5 => "BIG5",
            Charset::Utf8 => "UTF-8",
            Charset::Ucs2 => "UCS-2",
            Charset::Latin1 => "LATIN1",
        }
    }

    /// True for the single/double-byte regional charsets an operator may pick
    /// as the "what is this Latin-1 frame really" guess.
    pub fn is_legacy(self) -> bool {
        matches!(self, Charset::Gbk | Charset::Big5 | Charset::Latin1)
    }

    /// Parse a charset name that may stand in for Latin-1 marked bytes.
    pub fn parse_legacy(s: &str) -> Result<Self, CharsetError> {
        let charset: Charset = s.parse()?;
        if charset.is_legacy() {
            Ok(charset)
        } else {
            Err(CharsetError::NotLegacy(charset))
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = CharsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match norm.as_str() {
            "gbk" | "gb2312" | "cp936" => Ok(Charset::Gbk),
            "big5" | "cp950" => Ok(Charset::Big5),
            "utf8" => Ok(Charset::Utf8),
            "ucs2" | "utf16" | "utf16le" | "unicode" => Ok(Charset::Ucs2),
            "latin1" | "iso88591" | "ascii" => Ok(Charset::Latin1),
            _ => Err(CharsetError::Unknown(s.to_string())),
        }
    }
}

/// Convert `bytes` from one charset to another.
///
/// Same charset on both sides returns the input untouched.
pub fn convert(bytes: &[u8], from: Charset, to: Charset) -> Vec<u8> {
    if from == to {
        return bytes.to_vec();
    }
    let text = decode(bytes, from);
    encode(&text, to)
}

/// Decode to a Rust string (UTF-8) for display.
pub fn to_utf8(bytes: &[u8], from: Charset) -> String {
    decode(bytes, from).into_owned()
}

/// Encode a Rust string as UCS-2 storage bytes.
pub fn to_ucs2(text: &str) -> Vec<u8> {
    encode(text, Charset::Ucs2)
}

pub fn decode(bytes: &[u8], from: Charset) -> Cow<'_, str> {
    match from {
        Charset::Gbk => GBK.decode_without_bom_handling(bytes).0,
        Charset::Big5 => BIG5.decode_without_bom_handling(bytes).0,
        Charset::Ucs2 => UTF_16LE.decode_without_bom_handling(bytes).0,
        Charset::Utf8 => String::from_utf8_lossy(bytes),
        Charset::Latin1 => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

pub fn encode(text: &str, to: Charset) -> Vec<u8> {
    match to {
        // encoding_rs substitutes unmappable characters with numeric character references
        Charset::Gbk => GBK.encode(text).0.into_owned(),
        Charset::Big5 => BIG5.encode(text).0.into_owned(),
        Charset::Utf8 => text.as_bytes().to_vec(),
        Charset::Ucs2 => {
            let mut out = Vec::with_capacity(text.len() * 2);
            for c in text.chars() {
                let unit = if (c as u32) <= 0xFFFF {
                    c as u32 as u16
                } else {
                    char::REPLACEMENT_CHARACTER as u32 as u16
                };
                out.extend_from_slice(&unit.to_le_bytes());
            }
            out
        }
        Charset::Latin1 => text
            .chars()
            .map(|c| u8::try_from(c as u32).unwrap_or(b'?'))
            .collect(),
    }
}
