//! core/config.rs
//! Per-invocation settings, passed explicitly into every action.

use super::charset::Charset;
use super::filename::FilenamePattern;
use super::types::TagVersion;

#[derive(Debug, Clone)]
pub struct Settings {
    /// What Latin-1 marked frames are assumed to really contain.
    pub legacy: Charset,
    /// Shape used by derive-from-filename.
    pub pattern: FilenamePattern,
    /// ID3v2 revision written on save.
    pub version: TagVersion,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            legacy: Charset::Gbk,
            pattern: FilenamePattern::default(),
            version: TagVersion::Id3v23,
        }
    }
}

impl Settings {
    pub fn with_legacy(legacy: Charset) -> Self {
        Self {
            legacy,
            ..Self::default()
        }
    }
}
