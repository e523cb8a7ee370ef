//! Error types for the orchestrator crate.

use thiserror::Error;

/// Errors surfaced by session construction and settings loading.
///
/// Once a session is running, phase failures degrade into the result
/// (placeholder research, early debate termination, error verdicts)
/// instead of surfacing here.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Agent-layer failure (missing credential, provider error).
    #[error("agent error: {0}")]
    Agent(#[from] rostrum_agent::AgentError),

    /// Settings file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be parsed.
    #[error("settings error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for orchestrator operations.
pub type Result<T> = std::result::Result<T, SessionError>;
