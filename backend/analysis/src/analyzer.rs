//! The Analysis Orchestrator: one image in, one model call, one outcome out.
//!
//! No retry, no timeout of its own, no caching of identical images. Every
//! invocation is exactly one `generateContent` round trip.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use shezhen_core::{AnalysisOutcome, AnalysisResult, ShezhenError};

use crate::schema::{response_schema, ANALYSIS_PROMPT};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Seam for the gateway and CLI: anything that can turn image bytes into an
/// analysis outcome.
#[async_trait]
pub trait TongueAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<AnalysisOutcome, ShezhenError>;
}

/// Gemini-backed analyzer using the structured-output API.
pub struct GeminiAnalyzer {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiAnalyzer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// First candidate text of a reply, or `EmptyResponse`.
fn extract_text(reply: GenerateResponse) -> Result<String, ShezhenError> {
    reply
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or(ShezhenError::EmptyResponse)
}

/// Decode the model's JSON text into the result shape and classify it.
///
/// A missing field is a malformed response, not a defaulted one.
fn decode_outcome(text: &str) -> Result<AnalysisOutcome, ShezhenError> {
    let result: AnalysisResult =
        serde_json::from_str(text).map_err(|e| ShezhenError::MalformedResponse(e.to_string()))?;
    Ok(AnalysisOutcome::classify(result))
}

#[async_trait]
impl TongueAnalyzer for GeminiAnalyzer {
    async fn analyze(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<AnalysisOutcome, ShezhenError> {
        let b64 = shezhen_media::encode_image(image);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [
                { "inlineData": { "mimeType": mime_type, "data": b64 } },
                { "text": ANALYSIS_PROMPT }
            ]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        });

        debug!(model = %self.model, mime = mime_type, bytes = image.len(), "Sending image to Gemini");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ShezhenError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ShezhenError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ShezhenError::MalformedResponse(e.to_string()))?;

        let text = extract_text(reply)?;
        decode_outcome(&text)
    }
}
