//! Core data types for the Verne speculative-fiction engine.
//!
//! This crate provides the foundation data types used across all Verne
//! interfaces: content records and drafts, parameter selections, generation
//! metadata, and the provider request/response types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod content;
mod metadata;
mod parameters;
mod request;
mod telemetry;

pub use content::{
    ContentDraft, ContentKind, ContentPatch, ContentRecord, ImageBlob, ImageFormat,
    MAX_BODY_CHARS, default_title, new_content_id, truncate_chars,
};
pub use metadata::{ContentMetadata, FictionMetadata, ImageMetadata};
pub use parameters::{ParameterDefinition, ParameterKind, ParameterSelections, ParameterValue};
pub use request::{
    ImageRequest, ImageRequestBuilder, RenderedImage, TextRequest, TextRequestBuilder,
    TextResponse,
};
pub use telemetry::init_tracing;
