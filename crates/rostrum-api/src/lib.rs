//! REST API for Rostrum.
//!
//! Exposes the debate orchestrator over HTTP:
//! - `POST /api/debate` runs a debate to completion and returns the
//!   full result.
//! - `POST /api/debate/stream` runs a debate while streaming phase,
//!   message, and terminal events as server-sent events.
//! - `GET /api/health` reports service status.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
pub use types::{AgentOverride, DebateRequest, HealthResponse};
