use thiserror::Error;

/// The one generic message shown to users for any infrastructure failure.
/// The underlying cause is logged, never displayed.
pub const GENERIC_ANALYSIS_ERROR: &str =
    "Gagal menganalisis gambar. Pastikan API Key valid atau coba gambar lain.";

/// Top-level error type for the Shezhen runtime.
#[derive(Debug, Error)]
pub enum ShezhenError {
    /// The uploaded file is not an image; rejected before any analysis starts.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// The model service answered with a non-success HTTP status.
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// Network-level failure reaching the model service.
    #[error("transport error: {0}")]
    Transport(String),

    /// Schema-shaped reply with no candidate text to decode.
    #[error("empty response from model")]
    EmptyResponse,

    /// Response body that does not decode into the result shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A submission arrived while another analysis was in flight.
    #[error("an analysis is already in flight")]
    Busy,

    /// Missing or unusable configuration (e.g. no API key).
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_formats_status_and_body() {
        let err = ShezhenError::Provider {
            status: 403,
            message: "API key not valid".into(),
        };
        assert_eq!(err.to_string(), "provider returned 403: API key not valid");
    }
}
