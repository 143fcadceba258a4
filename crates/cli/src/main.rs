//! CivicLens CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize config
//! - `ask`     — Run one query through the pipeline from the terminal
//! - `serve`   — Start the HTTP API gateway

use clap::{Parser, Subcommand};

use civiclens_core::DetailLevel;

mod commands;

#[derive(Parser)]
#[command(
    name = "civiclens",
    about = "CivicLens — AI-powered political literacy and policy explainer",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Ask a civic question from the terminal
    Ask {
        /// The question
        question: String,

        /// Desired depth: simplified, balanced, or detailed
        #[arg(short, long, default_value = "balanced")]
        detail_level: DetailLevel,

        /// Optional topic category ("policy", "constitution", ...)
        #[arg(short, long)]
        topic: Option<String>,
    },

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run()?,
        Commands::Ask {
            question,
            detail_level,
            topic,
        } => commands::ask::run(question, detail_level, topic).await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
    }

    Ok(())
}
