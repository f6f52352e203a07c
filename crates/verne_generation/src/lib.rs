//! Content generation pipeline for Verne.
//!
//! Turns vetted parameter selections into stored speculative fiction:
//! prompt assembly, the two-stage text-then-image pipeline, visual cue
//! extraction, and in-memory implementations of the storage and catalog
//! traits for running without a database.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use verne_core::ContentKind;
//! use verne_generation::{GenerationRequest, MemoryContentStore, StaticParameterSource, StoryPipeline};
//! use verne_models::{OpenAiImageClient, OpenAiTextClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = StoryPipeline::new(
//!     Arc::new(OpenAiTextClient::new("gpt-4o-mini".to_string())?),
//!     Arc::new(OpenAiImageClient::new("gpt-image-1".to_string())?),
//!     Arc::new(StaticParameterSource::new()),
//!     Arc::new(MemoryContentStore::new()),
//! );
//! let record = pipeline.generate(GenerationRequest::new(ContentKind::Combined)).await?;
//! println!("{}: {}", record.id, record.title);
//! # Ok(())
//! # }
//! ```

mod cues;
mod extraction;
mod memory;
mod pipeline;
mod prompt;
mod validate;

pub use cues::{MAX_CUES, extract_visual_cues};
pub use extraction::{extract_title, extract_year, word_count};
pub use memory::{MemoryContentStore, StaticParameterSource};
pub use pipeline::{GenerationRequest, GenerationSettings, StoryPipeline, parse_kind};
pub use prompt::PromptBuilder;
pub use validate::{FilteredSelections, filter_selections};
