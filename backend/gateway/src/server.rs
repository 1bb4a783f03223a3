//! Main HTTP gateway server.
//!
//! Serves the single-page upload UI and the analysis API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use shezhen_analysis::TongueAnalyzer;
use shezhen_core::AnalysisSession;

use crate::{analyze, ui};

/// Application state shared across routes.
///
/// One session per process: the screen is single-flight by design, and the
/// mutex-held session is what makes the in-flight guard hard rather than
/// advisory.
#[derive(Clone)]
pub struct GatewayState {
    pub analyzer: Arc<dyn TongueAnalyzer>,
    pub session: Arc<Mutex<AnalysisSession>>,
}

impl GatewayState {
    pub fn new(analyzer: Arc<dyn TongueAnalyzer>) -> Self {
        Self {
            analyzer,
            session: Arc::new(Mutex::new(AnalysisSession::new())),
        }
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route("/api/analyze", post(analyze::analyze_image))
        .route("/api/session", get(analyze::current_session))
        .route("/api/health", get(health))
        // The UI advertises a 5MB guideline; leave headroom for multipart framing.
        .layer(DefaultBodyLimit::max(8 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server for the gateway.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "shezhen",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
