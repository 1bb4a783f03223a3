use serde::Deserialize;

use shezhen_core::ShezhenError;

/// Shezhen runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Gemini API key
    pub gemini_api_key: Option<String>,
    /// Model to request
    pub model: String,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            gemini_api_key: None,
            model: shezhen_analysis::DEFAULT_MODEL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("SHEZHEN_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("SHEZHEN_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: std::env::var("SHEZHEN_MODEL")
                .unwrap_or_else(|_| shezhen_analysis::DEFAULT_MODEL.to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// The API key, or a clear config error instead of a late auth failure
    /// from the remote call.
    pub fn require_api_key(&self) -> Result<&str, ShezhenError> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| ShezhenError::Config("GEMINI_API_KEY is not set".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_a_config_error() {
        let config = Config::default();
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, shezhen_analysis::DEFAULT_MODEL);
    }
}
