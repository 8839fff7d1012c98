//! web/mod.rs
//!
//! A small local browser front-end over `core::actions`:
//! - `/dir/...` browse directories
//! - `/info/...` show frames (the `info` action's output)
//! - `/conv/...` convert legacy frames (POST)
//! - `/cover/...` the embedded cover as a JPEG
//!
//! Single user, no auth. Not meant to face the internet.

mod error;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub use error::WebError;
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/dir", get(routes::home_dir))
        .route("/dir/", get(routes::home_dir))
        .route("/dir/*path", get(routes::dir))
        .route("/info/*path", get(routes::info))
        .route("/conv/*path", post(routes::conv))
        .route("/cover/*path", get(routes::cover))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
