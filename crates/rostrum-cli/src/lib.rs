//! CLI for Rostrum.
//!
//! Two entry points: `rostrum run <topic>` executes a single debate
//! and prints the verdict; `rostrum serve` starts the HTTP API.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, OutputFormat};
pub use commands::{execute, CliError};
