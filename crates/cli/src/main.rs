//! Recall CLI: the main entry point.
//!
//! Commands:
//! - `chat`: Interactive REPL or single-message mode
//! - `memory`: Inspect, export and import the memory file
//! - `onboard`: Write a default config file

use clap::{Parser, Subcommand};

mod commands;
mod input;
mod repl;

#[derive(Parser)]
#[command(
    name = "recall",
    about = "Recall — a conversational assistant that remembers",
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
    /// Chat with the assistant
    Chat {
        /// API key for the configured provider (overrides config and environment)
        #[arg(long)]
        api_key: Option<String>,

        /// Keep memory in this process only; nothing is written to disk
        #[arg(long)]
        ephemeral: bool,

        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Manage the persistent memory
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },

    /// Initialize configuration
    Onboard,
}

#[derive(Subcommand)]
enum MemoryAction {
    /// Print every stored key and value
    Show,

    /// Export memory as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Replace memory with an exported JSON file
    Import {
        /// The JSON file to import
        file: String,
    },

    /// List recorded improvements
    Improvements,
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
        Commands::Chat {
            api_key,
            ephemeral,
            message,
        } => commands::chat::run(api_key, ephemeral, message).await?,
        Commands::Memory { action } => match action {
            MemoryAction::Show => commands::memory::show()?,
            MemoryAction::Export { output } => commands::memory::export(output.as_deref())?,
            MemoryAction::Import { file } => commands::memory::import(&file)?,
            MemoryAction::Improvements => commands::memory::improvements()?,
        },
        Commands::Onboard => commands::onboard::run()?,
    }

    Ok(())
}
