//! Core data models for Rostrum.
//!
//! This crate provides the fundamental data types used throughout the
//! Rostrum debate system: messages and roles, debate configuration,
//! judgments, and the final debate result.

pub mod config;
pub mod judgment;
pub mod message;
pub mod result;

// Re-export main types
pub use config::DebateConfig;
pub use judgment::{DebateScores, Judgment, JudgmentAnalysis, Winner};
pub use message::{Message, Role, RoleParseError};
pub use result::{DebateMetadata, DebateResult};
