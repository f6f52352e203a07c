//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the verne binary.

mod commands;
mod content;
mod generate;
mod serve;
mod wiring;

pub use commands::{Cli, Commands, ContentCommands, GenerateArgs, OutputFormat};
pub use content::handle_content_command;
pub use generate::handle_generate;
pub use serve::{handle_migrate, handle_serve};
pub use wiring::{build_pipeline, build_store};
