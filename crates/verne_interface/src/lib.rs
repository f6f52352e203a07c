//! Trait definitions for the Verne speculative-fiction engine.
//!
//! This crate provides the seams between the generation pipeline and its
//! collaborators: the generative providers, the parameter catalog, and the
//! content store, along with the filter and pagination types those seams
//! speak in.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ContentStore, ImageModel, ParameterSource, TextModel};
pub use types::{
    ContentFilter, ContentSummary, DEFAULT_PAGE_LIMIT, ImageLookup, MAX_PAGE_LIMIT, Page,
    PageRequest, Pagination,
};
