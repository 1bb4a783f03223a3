//! Upload and analysis endpoints.
//!
//! `POST /api/analyze` is the whole pipeline: validate the upload, take the
//! in-flight guard, encode, call the model, and store the terminal phase.
//! `GET /api/session` lets the page re-read the current phase.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

use shezhen_core::{AnalysisSession, SessionPhase, GENERIC_ANALYSIS_ERROR};

use crate::server::GatewayState;

/// Alert text for a non-image upload, shown by the page as-is.
const NOT_AN_IMAGE: &str = "Mohon unggah file gambar.";
/// Refusal text when a submission arrives while one is in flight.
const ANALYSIS_IN_FLIGHT: &str = "Analisis lain sedang berjalan. Mohon tunggu.";

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Releases the in-flight guard when the handler future is dropped before a
/// terminal phase was recorded.
///
/// Axum drops the handler on client disconnect; without this the session
/// would stay `Loading` forever and every later upload would be refused.
struct FlightGuard {
    session: Arc<Mutex<AnalysisSession>>,
    armed: bool,
}

impl FlightGuard {
    fn new(session: Arc<Mutex<AnalysisSession>>) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    /// A terminal phase has been stored; nothing left to clean up.
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("Request dropped mid-analysis; releasing in-flight guard");
        let session = Arc::clone(&self.session);
        tokio::spawn(async move {
            let mut session = session.lock().await;
            if session.is_loading() {
                session.fail(GENERIC_ANALYSIS_ERROR);
            }
        });
    }
}

/// Handler for `POST /api/analyze`.
///
/// Expects one multipart part carrying the image. The MIME-prefix check
/// happens before the session is touched, so a rejected upload changes no
/// loading/result/error state and sends no model request.
pub async fn analyze_image(
    State(state): State<GatewayState>,
    mut multipart: Multipart,
) -> Response {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => return reject(StatusCode::BAD_REQUEST, NOT_AN_IMAGE),
        Err(e) => {
            warn!(error = %e, "Unreadable multipart upload");
            return reject(StatusCode::BAD_REQUEST, NOT_AN_IMAGE);
        }
    };

    let mime = field.content_type().unwrap_or_default().to_string();
    if !shezhen_media::is_image(&mime) {
        warn!(mime = %mime, "Rejected non-image upload");
        return reject(StatusCode::UNSUPPORTED_MEDIA_TYPE, NOT_AN_IMAGE);
    }

    // Hard in-flight guard: refuse instead of racing the outstanding request.
    {
        let mut session = state.session.lock().await;
        if session.begin().is_err() {
            return reject(StatusCode::CONFLICT, ANALYSIS_IN_FLIGHT);
        }
    }
    // From here until a terminal phase is stored, a dropped connection must
    // not strand the session in `Loading`.
    let mut flight = FlightGuard::new(Arc::clone(&state.session));

    let request_id = Uuid::new_v4();

    // The file-read step; a failure here is an infrastructure error like any
    // other and lands in the same terminal error phase.
    let image = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(%request_id, error = %e, "Failed to read upload body");
            let mut session = state.session.lock().await;
            session.fail(GENERIC_ANALYSIS_ERROR);
            flight.disarm();
            return (StatusCode::OK, Json(session.phase().clone())).into_response();
        }
    };

    info!(%request_id, mime = %mime, bytes = image.len(), "Starting tongue analysis");

    let outcome = state.analyzer.analyze(&image, &mime).await;

    let mut session = state.session.lock().await;
    match outcome {
        Ok(outcome) => session.complete(outcome),
        Err(e) => {
            error!(%request_id, error = %e, "Analysis failed");
            session.fail(GENERIC_ANALYSIS_ERROR);
        }
    }
    flight.disarm();

    (StatusCode::OK, Json(session.phase().clone())).into_response()
}

/// Handler for `GET /api/session`.
pub async fn current_session(State(state): State<GatewayState>) -> Json<SessionPhase> {
    let session = state.session.lock().await;
    Json(session.phase().clone())
}
