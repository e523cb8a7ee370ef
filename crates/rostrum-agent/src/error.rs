//! Error types for the agent crate.

use thiserror::Error;

/// Errors that can occur in agent operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Required credential or setting is missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An LLM or search vendor returned a non-2xx response.
    #[error("{provider} API error {status}: {body}")]
    Provider {
        /// Provider identifier.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The HTTP request itself failed (connect, timeout, TLS).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx response did not match the provider's documented shape.
    #[error("unexpected response shape from {provider}")]
    ResponseShape {
        /// Provider identifier.
        provider: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = AgentError::Provider {
            provider: "openai".into(),
            status: 429,
            body: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "openai API error 429: rate limited");
    }

    #[test]
    fn test_configuration_error_display() {
        let err = AgentError::Configuration("missing GOOGLE_API_KEY".into());
        assert_eq!(err.to_string(), "configuration error: missing GOOGLE_API_KEY");
    }
}
