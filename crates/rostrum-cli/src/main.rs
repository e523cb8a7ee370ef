//! Rostrum CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use rostrum_cli::cli::Cli;
use rostrum_cli::commands;

#[tokio::main]
async fn main() {
    // Load .env if it exists (for GOOGLE_API_KEY etc.)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    let config_path = cli.config.clone();
    if let Err(e) = commands::execute(cli.command, config_path.as_deref()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
