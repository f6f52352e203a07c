//! Verne - Speculative-Fiction Generation Engine
//!
//! Verne turns structured user selections into stored speculative fiction:
//! an external generative provider produces prose and/or an accompanying
//! illustration, and the result is persisted for filtered, paginated
//! retrieval.
//!
//! # Features
//!
//! - **Two-Stage Pipeline**: prose first, then an illustration grounded in
//!   the generated text via extracted visual cues
//! - **Parameter Vetting**: submitted selections are checked against a
//!   declared catalog; out-of-range values are dropped, never fatal
//! - **Indexed Persistence**: PostgreSQL store with kind/year filters and
//!   stable newest-first pagination
//! - **HTTP Surface**: a thin axum router for retrieval and generation
//! - **CLI**: serve, generate, and inspect content from the terminal
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use verne::{
//!     ContentKind, GenerationRequest, OpenAiImageClient, OpenAiTextClient, PgContentStore,
//!     StaticParameterSource, StoryPipeline, build_pool,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(PgContentStore::new(build_pool()?));
//!     let pipeline = StoryPipeline::new(
//!         Arc::new(OpenAiTextClient::new("gpt-4o-mini".to_string())?),
//!         Arc::new(OpenAiImageClient::new("gpt-image-1".to_string())?),
//!         Arc::new(StaticParameterSource::new()),
//!         store,
//!     );
//!
//!     let record = pipeline
//!         .generate(GenerationRequest::new(ContentKind::Combined))
//!         .await?;
//!     println!("stored {}: {}", record.id, record.title);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Verne is organized as a workspace with focused crates:
//!
//! - `verne_error` - Error types
//! - `verne_core` - Content, parameter, and provider data types
//! - `verne_interface` - Provider, catalog, and store traits
//! - `verne_database` - PostgreSQL integration
//! - `verne_models` - Provider client implementations
//! - `verne_generation` - Cue extraction, prompts, validation, pipeline
//! - `verne_server` - HTTP boundary
//!
//! This crate (`verne`) re-exports everything for convenience and carries
//! the CLI binary.

// Re-export the workspace crates
pub use verne_core::*;
pub use verne_error::*;
pub use verne_generation::*;
pub use verne_interface::*;
pub use verne_models::*;

// Database integration (selective, the schema module stays namespaced)
pub use verne_database::{
    PgContentStore, build_pool, build_pool_with_url, database_url, establish_connection,
    establish_connection_with_url, run_migrations,
};

// HTTP boundary
pub use verne_server::{ApiState, ErrorBody, create_router, serve};

mod config;

pub use config::{
    CatalogConfig, CatalogFile, DatabaseConfig, GenerationConfig, ImageConfig, ServerConfig,
    TextConfig, VerneConfig, load_catalog,
};
