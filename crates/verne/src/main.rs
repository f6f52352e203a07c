//! Verne CLI binary.
//!
//! This binary provides command-line access to Verne's functionality:
//! - Run the HTTP server
//! - Generate content from the terminal
//! - Manage and query stored content
//! - Apply database migrations

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_content_command, handle_generate, handle_migrate, handle_serve};

    // Provider keys may live in a local .env file
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = verne::VerneConfig::load_or_default(&cli.config)?;

    // Execute the requested command
    match cli.command {
        Commands::Serve { bind } => {
            handle_serve(&config, bind).await?;
        }

        Commands::Generate(args) => {
            handle_generate(&config, args).await?;
        }

        Commands::Content(content_cmd) => {
            handle_content_command(&config, content_cmd).await?;
        }

        Commands::Migrate => {
            handle_migrate(&config)?;
        }
    }

    Ok(())
}
