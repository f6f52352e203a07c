//! PostgreSQL integration for Verne.
//!
//! This crate provides the Diesel schema, row models, and the pooled async
//! [`PgContentStore`] implementing the `ContentStore` trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use verne_database::{PgContentStore, build_pool, establish_connection, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut conn = establish_connection()?;
//! run_migrations(&mut conn)?;
//!
//! let store = PgContentStore::new(build_pool()?);
//! // Use store...
//! # Ok(())
//! # }
//! ```

mod connection;
mod content_management;
mod models;
mod store;

// Public module for external access
pub mod schema;

// Re-export connection utilities
pub use connection::{
    build_pool, build_pool_with_url, database_url, establish_connection,
    establish_connection_with_url, run_migrations,
};

// Re-export synchronous query functions
pub use content_management::{
    count_content, delete_content, distinct_setting_years, get_content_by_id, get_content_image,
    list_content, list_content_summaries, save_content, update_content,
};

// Re-export model types
pub use models::{ContentRecordChangeset, ContentRecordRow, NewContentRecordRow};

pub use store::PgContentStore;

use verne_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
