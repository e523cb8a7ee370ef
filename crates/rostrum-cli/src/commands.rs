//! Command execution for the Rostrum CLI.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use rostrum_api::{ApiConfig, AppState};
use rostrum_models::DebateResult;
use rostrum_orchestrator::{DebateSession, SessionError, Settings};

use crate::cli::{Commands, OutputFormat};

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Session construction or settings failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Output file could not be written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Result could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Executes a parsed command.
pub async fn execute(command: Commands, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Run {
            topic,
            max_turns,
            max_time,
            output,
            format,
        } => run(topic, max_turns, max_time, output, format, config_path).await,
        Commands::Serve { host, port } => serve(host, port, config_path).await,
    }
}

async fn run(
    topic: String,
    max_turns: Option<u32>,
    max_time: Option<u64>,
    output: Option<PathBuf>,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut settings = Settings::load(config_path)?;
    if let Some(max_turns) = max_turns {
        settings.debate.max_turns = max_turns;
    }
    if let Some(max_time) = max_time {
        settings.debate.max_time_secs = max_time;
    }

    let mut session = DebateSession::from_settings(&settings)?;
    info!(session = %session.id(), topic, "running debate");
    let result = session.run(&topic).await;

    match format {
        OutputFormat::Table => print_banner(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    if let Some(path) = output {
        std::fs::write(&path, serde_json::to_string_pretty(&result)?)?;
        println!("Results saved to {}", path.display());
    }

    Ok(())
}

async fn serve(host: String, port: u16, config_path: Option<&Path>) -> Result<()> {
    let settings = Settings::load(config_path)?;
    let config = ApiConfig::new(host, port);
    let state = AppState::new(config.clone(), settings);

    rostrum_api::serve(config, state).await?;
    Ok(())
}

fn print_banner(result: &DebateResult) {
    let rule = "=".repeat(60);
    println!("\n{}", rule);
    println!("DEBATE RESULTS: {}", result.topic);
    println!("{}", rule);
    println!("Winner: {}", result.winner);
    println!("Reasoning: {}", result.reasoning);
    println!(
        "Score: PRO {} / CON {}",
        result.score.pro_score, result.score.con_score
    );
    println!(
        "Turns: {}  Duration: {:.1}s",
        result.metadata.total_turns, result.metadata.duration_secs
    );
    println!("{}", rule);
}
