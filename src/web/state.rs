//! Shared state for the web handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::{Charset, TagStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TagStore + Send + Sync>,
    /// Listed when `/dir/` is opened without a path.
    pub home: PathBuf,
    /// Legacy charset used when a request does not pick one.
    pub legacy: Charset,
}

impl AppState {
    pub fn new(store: Arc<dyn TagStore + Send + Sync>, home: PathBuf, legacy: Charset) -> Self {
        Self {
            store,
            home,
            legacy,
        }
    }
}
