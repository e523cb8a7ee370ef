//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Rostrum - Multi-agent debate orchestration system
#[derive(Parser, Debug)]
#[command(name = "rostrum")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a YAML settings file
    #[arg(short, long, env = "ROSTRUM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single debate on a topic
    Run {
        /// Debate topic
        #[arg(required = true)]
        topic: String,

        /// Maximum number of turns
        #[arg(long)]
        max_turns: Option<u32>,

        /// Maximum debate time in seconds
        #[arg(long)]
        max_time: Option<u64>,

        /// Write the full JSON result to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Output format for debate results.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable results banner.
    #[default]
    Table,
    /// Pretty-printed JSON result.
    Json,
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
