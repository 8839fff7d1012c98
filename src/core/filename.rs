//! core/filename.rs
//! Split a filename like "03. Song Title" into a track number and a title.
//!
//! Shape: leading digit run, then at most one separator character, then the
//! rest (whitespace trimmed) is the title.

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenamePattern {
    separators: Vec<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedTags {
    pub track: String,
    pub title: String,
}

impl Default for FilenamePattern {
    fn default() -> Self {
        Self {
            separators: vec!['.', '|'],
        }
    }
}

impl FromStr for FilenamePattern {
    type Err = std::convert::Infallible;

    /// Every char of `s` is a separator. Whitespace always is.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::with_separators(s.chars()))
    }
}

impl FilenamePattern {
    pub fn with_separators(separators: impl IntoIterator<Item = char>) -> Self {
        Self {
            separators: separators.into_iter().collect(),
        }
    }

    fn is_separator(&self, c: char) -> bool {
        c.is_whitespace() || self.separators.contains(&c)
    }

    /// `None` when the name does not start with a digit.
    pub fn parse(&self, stem: &str) -> Option<DerivedTags> {
        let digits_end = stem
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(stem.len());
        if digits_end == 0 {
            return None;
        }

        let (track, mut rest) = stem.split_at(digits_end);

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            if self.is_separator(c) {
                rest = chars.as_str();
            }
        }

        Some(DerivedTags {
            track: track.to_string(),
            title: rest.trim().to_string(),
        })
    }
}
