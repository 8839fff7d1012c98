//! Route handlers.
//!
//! Song processing is blocking, so every handler that touches files hops onto
//! `spawn_blocking` and renders whatever the action printed.

use std::io::{self, Write};
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::core::{BatchReport, Charset, Settings, Song, actions, library};

use super::error::{Result, WebError};
use super::render;
use super::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CharsetQuery {
    #[serde(default)]
    pub charset: Option<String>,
}

/// GET / - start browsing at home
pub async fn index() -> Redirect {
    Redirect::to("/dir/")
}

/// GET /dir/ - list the home directory
pub async fn home_dir(State(state): State<AppState>) -> Result<Html<String>> {
    list_dir(state.home.clone()).await
}

/// GET /dir/*path - list any directory
pub async fn dir(Path(rest): Path<String>) -> Result<Html<String>> {
    list_dir(absolute(&rest)).await
}

/// GET /info/*path - frames of one file, or of every mp3 in a directory
pub async fn info(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    Query(query): Query<CharsetQuery>,
) -> Result<Html<String>> {
    let path = absolute(&rest);
    let settings = Settings::with_legacy(pick_charset(&state, &query)?);
    let legacy = settings.legacy;

    let store = Arc::clone(&state.store);
    let target = path.clone();
    let (output, _) = run_captured(move |out| {
        actions::info(&*store, &[target], &settings, out)
    })
    .await?;

    Ok(Html(render::info_page(&path, &output, legacy, path.is_file())))
}

/// POST /conv/*path - upgrade legacy frames to Unicode
pub async fn conv(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    Query(query): Query<CharsetQuery>,
) -> Result<Html<String>> {
    let path = absolute(&rest);
    let settings = Settings::with_legacy(pick_charset(&state, &query)?);

    let store = Arc::clone(&state.store);
    let target = path.clone();
    let (output, report) = run_captured(move |out| {
        actions::convert(&*store, &[target], &settings, out)
    })
    .await?;
    tracing::info!(path = %path.display(), ?report, "web convert finished");

    Ok(Html(render::conv_page(&path, &output)))
}

/// GET /cover/*path - the embedded cover image
pub async fn cover(State(state): State<AppState>, Path(rest): Path<String>) -> Result<Response> {
    let path = absolute(&rest);
    let store = Arc::clone(&state.store);

    let data = tokio::task::spawn_blocking(move || -> Result<Option<Vec<u8>>> {
        if !(path.is_file() && library::is_mp3(&path)) {
            return Err(WebError::NotFound(path.display().to_string()));
        }
        let song = Song::load(path, &*store)?;
        Ok(song.cover().map(|image| image.data.clone()))
    })
    .await??;

    match data {
        Some(bytes) => Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response()),
        None => Err(WebError::NotFound("no cover".to_string())),
    }
}

async fn list_dir(dir: PathBuf) -> Result<Html<String>> {
    let html = tokio::task::spawn_blocking(move || -> Result<String> {
        if !dir.is_dir() {
            return Err(WebError::NotFound(dir.display().to_string()));
        }
        let entries = read_listing(&dir)?;
        Ok(render::dir_listing(&dir, &entries))
    })
    .await??;

    Ok(Html(html))
}

/// Visible entries of `dir`, sorted, each flagged as directory or not.
fn read_listing(dir: &FsPath) -> io::Result<Vec<(PathBuf, bool)>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        let is_dir = path.is_dir();
        out.push((path, is_dir));
    }
    out.sort();
    Ok(out)
}

/// Run an action on a blocking worker, capturing what it prints.
async fn run_captured<F>(f: F) -> Result<(String, BatchReport)>
where
    F: FnOnce(&mut dyn Write) -> io::Result<BatchReport> + Send + 'static,
{
    let (buf, report) = tokio::task::spawn_blocking(move || -> io::Result<(Vec<u8>, BatchReport)> {
        let mut buf = Vec::new();
        let report = f(&mut buf)?;
        Ok((buf, report))
    })
    .await??;

    Ok((String::from_utf8_lossy(&buf).into_owned(), report))
}

fn pick_charset(state: &AppState, query: &CharsetQuery) -> Result<Charset> {
    match query.charset.as_deref() {
        None | Some("") => Ok(state.legacy),
        Some(name) => {
            Charset::parse_legacy(name).map_err(|e| WebError::BadRequest(e.to_string()))
        }
    }
}

/// Wildcard captures come without the leading slash.
fn absolute(rest: &str) -> PathBuf {
    PathBuf::from("/").join(rest.trim_start_matches('/'))
}
