//! Visualization server.
//!
//! Serves the embedded viewer assets plus two API endpoints: the raw log
//! text and the ingested graph. The graph is rebuilt from the file on each
//! request, so a browser refresh reflects log growth; there is no push
//! channel. This is the only part of the tool that owns an async runtime.

pub mod tail;

use crate::ingest::ingest;
use crate::utils::error::ServeError;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use log::{debug, info, warn};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tail::LogTailer;

static INDEX_HTML: &str = include_str!("../../assets/index.html");
static APP_JS: &str = include_str!("../../assets/app.js");

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Log file served and ingested on request
    pub log_file: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Interval at which the tailer polls the log file
    pub poll_interval: Duration,
}

/// Build the router
///
/// **Public** - separated from `serve` so tests can drive the app directly
pub fn app(config: Arc<ServeConfig>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/app.js", get(app_js))
        .route("/api/data", get(api_data))
        .route("/api/graph", get(api_graph))
        .with_state(config)
}

/// Run the server until interrupted
///
/// **Public** - owns the tokio runtime; the rest of the tool stays
/// synchronous
pub fn serve(config: ServeConfig) -> Result<(), ServeError> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServeError::BindFailed {
                addr: addr.to_string(),
                source,
            })?;

        info!("Server running at http://{}", addr);

        let config = Arc::new(config);
        tokio::spawn(tail_loop(
            config.log_file.clone(),
            config.poll_interval,
        ));

        axum::serve(listener, app(config))
            .await
            .map_err(ServeError::IoError)
    })
}

/// Poll the log file and log appended deltas
///
/// **Private** - debug aid, not a live-update channel
async fn tail_loop(path: PathBuf, interval: Duration) {
    let mut tailer = LogTailer::new(path);
    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;
        match tailer.poll() {
            Ok(Some(delta)) => {
                debug!("Log grew by {} bytes", delta.len());
            }
            Ok(None) => {}
            Err(e) => warn!("Log tail poll failed: {}", e),
        }
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        APP_JS,
    )
}

/// Raw log text, as written by the traced runtime
async fn api_data(State(config): State<Arc<ServeConfig>>) -> impl IntoResponse {
    match std::fs::read_to_string(&config.log_file) {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(e) => {
            warn!("Could not read {}: {}", config.log_file.display(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Could not read {}", config.log_file.display()),
            )
                .into_response()
        }
    }
}

/// Ingested graph for the renderer
///
/// A fatal ingestion failure is surfaced as 500 ("no visualization
/// available"); a degenerate empty trace returns the placeholder graph with
/// 200 ("nothing to show") - distinct states by design of the error tiers.
async fn api_graph(State(config): State<Arc<ServeConfig>>) -> impl IntoResponse {
    let raw = match std::fs::read_to_string(&config.log_file) {
        Ok(text) => text,
        Err(e) => {
            warn!("Could not read {}: {}", config.log_file.display(), e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Could not read {}", config.log_file.display()),
            )
                .into_response();
        }
    };

    match ingest(&raw) {
        Ok(graph) => {
            debug!(
                "Serving graph: {} nodes, {} edges",
                graph.nodes.len(),
                graph.edges.len()
            );
            Json(graph).into_response()
        }
        Err(e) => {
            warn!("Ingestion failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Ingestion failed: {}", e))
                .into_response()
        }
    }
}
