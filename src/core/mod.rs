//! core/mod.rs
//!
//! The brain of the tool:
//! - Resolve user paths into MP3 files (filesystem walk, one level deep)
//! - Read/write ID3 frames through a `TagStore` (metadata IO)
//! - Convert legacy GBK/BIG5 text into Unicode storage
//! - Run the four verbs and report progress as plain text
//!
//! Pipeline:
//!   (A) resolve paths -> Vec<PathBuf>
//!   (B) load songs -> Song (frames wrapped as Tags)
//!   (C) mutate + save -> strip, write reserved frames, reload
//!
//! Front doors (CLI in main.rs, the web module) only ever call `actions::*`
//! or `Song` directly; neither knows about the id3 crate.

pub mod actions;
pub mod charset;
pub mod config;
pub mod cover;
pub mod error;
pub mod filename;
pub mod library;
pub mod song;
pub mod tag;
pub mod tags;
pub mod types;

pub use actions::BatchReport;
pub use charset::Charset;
pub use config::Settings;
pub use error::{CoverError, TagError};
pub use song::Song;
pub use tag::Tag;
pub use tags::{Id3Store, MemoryStore, TagStore};
