//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Verne - Speculative-fiction generation engine with indexed content persistence
#[derive(Parser, Debug)]
#[command(name = "verne")]
#[command(about = "Speculative-fiction generation engine with indexed content persistence", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file
    #[arg(long, default_value = "verne.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind address, overrides the configured one
        #[arg(long)]
        bind: Option<String>,
    },

    /// Generate a piece of content and store it
    Generate(GenerateArgs),

    /// Content management commands
    #[command(subcommand)]
    Content(ContentCommands),

    /// Apply pending database migrations
    Migrate,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Content kind to produce (fiction, image, or combined)
    #[arg(long)]
    pub kind: String,

    /// Setting year for the produced content
    #[arg(long)]
    pub year: Option<i32>,

    /// Parameter selection, repeatable
    #[arg(long = "param", value_name = "CATEGORY.PARAMETER=VALUE")]
    pub params: Vec<String>,

    /// Write the generated image to this path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Content management subcommands
#[derive(Subcommand, Debug)]
pub enum ContentCommands {
    /// List stored content
    List {
        /// Content kind filter
        #[arg(long)]
        kind: Option<String>,

        /// Setting year filter
        #[arg(long)]
        year: Option<i32>,

        /// Page to display
        #[arg(long, default_value = "1")]
        page: i64,

        /// Maximum number of rows per page
        #[arg(long, default_value = "10")]
        limit: i64,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show a specific content item
    Show {
        /// ID of the content item
        id: String,
    },

    /// Delete a content item
    Delete {
        /// ID of the content item
        id: String,
    },

    /// List the distinct setting years in the store
    Years,
}

/// Output format options
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
