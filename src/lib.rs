//! mp3tag
//!
//! Inspect and rewrite ID3 tags on MP3 files:
//! - list frames (`info`)
//! - upgrade GBK/BIG5 text frames to Unicode (`conv`)
//! - attach a cover image from disk or a URL (`cover`)
//! - derive track number and title from the filename (`fname`)
//!
//! `core` does the work; `web` is a small local browser front-end over it.

pub mod core;
pub mod web;
