//! HTTP boundary for the Verne content engine.
//!
//! A thin axum router over the content store and the generation pipeline.
//! Handlers translate between wire DTOs and domain types and hold no
//! business logic of their own:
//! - **GET /health**: liveness check
//! - **POST /api/content/generate**: run the pipeline and persist the result
//! - **GET /api/content**: filtered, paginated listing of full records
//! - **GET /api/content/summary**: the same listing without payload fields
//! - **GET /api/content/years**: distinct setting years
//! - **GET /api/content/:id** (+ PATCH, DELETE): single-record operations
//! - **GET /api/content/:id/image**: raw image bytes with cache headers

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod dto;
mod error;
mod server;

pub use api::{ApiState, create_router};
pub use dto::{ContentView, GenerateBody, ListQuery, SummaryView, UpdateBody};
pub use error::{ApiError, ErrorBody};
pub use server::serve;
