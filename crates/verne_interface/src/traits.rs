//! Trait definitions for providers, parameter catalogs, and content stores.

use crate::{ContentFilter, ContentSummary, ImageLookup, Page, PageRequest};
use async_trait::async_trait;
use verne_core::{
    ContentDraft, ContentPatch, ContentRecord, ImageRequest, ParameterDefinition, RenderedImage,
    TextRequest, TextResponse,
};
use verne_error::VerneResult;

/// A text-completion backend.
///
/// This provides the minimal interface for blocking prose generation.
/// One request maps to one provider round trip; there is no streaming.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Generate a prose completion for the request.
    async fn generate_text(&self, req: &TextRequest) -> VerneResult<TextResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

/// An image-rendering backend.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Render an image for the request, normalized to raw bytes.
    async fn render_image(&self, req: &ImageRequest) -> VerneResult<RenderedImage>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-image-1").
    fn model_name(&self) -> &str;
}

/// Catalog of the parameters users may select, keyed by category.
///
/// The catalog lives outside this system; implementations adapt whatever
/// backs it (a database, a config file, a remote service).
#[async_trait]
pub trait ParameterSource: Send + Sync {
    /// Declared parameters for a category, or `None` when the category is
    /// unknown.
    async fn category_parameters(
        &self,
        category_id: &str,
    ) -> VerneResult<Option<Vec<ParameterDefinition>>>;
}

/// Repository for storing and retrieving generated content.
///
/// This trait defines the persistence seam. Implementations can use
/// databases or in-memory structures; all methods are async to support
/// async drivers and pooled connections.
///
/// Lookup misses are `None` (or [`ImageLookup::NotFound`]), never errors;
/// errors are reserved for storage-engine failures.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Persist a draft, assigning an id, title, and timestamps when the
    /// draft carries none. Saving an existing id overwrites that record.
    async fn save(&self, draft: ContentDraft) -> VerneResult<ContentRecord>;

    /// Load a record by id.
    async fn get(&self, id: &str) -> VerneResult<Option<ContentRecord>>;

    /// List full records matching the filter, newest first.
    async fn list(
        &self,
        filter: &ContentFilter,
        page: &PageRequest,
    ) -> VerneResult<Page<ContentRecord>>;

    /// List lightweight summaries matching the filter, newest first.
    ///
    /// Summaries never carry the prose body or image payload, so listing
    /// stays cheap regardless of stored blob sizes.
    async fn list_summaries(
        &self,
        filter: &ContentFilter,
        page: &PageRequest,
    ) -> VerneResult<Page<ContentSummary>>;

    /// Load the image payload for a record.
    ///
    /// Distinguishes a missing record from a record that exists without an
    /// image; callers surface the two differently.
    async fn image(&self, id: &str) -> VerneResult<ImageLookup>;

    /// Apply a partial update, returning the updated record, or `None` when
    /// the id is unknown.
    async fn update(&self, id: &str, patch: ContentPatch) -> VerneResult<Option<ContentRecord>>;

    /// Delete a record, returning it, or `None` when the id is unknown.
    async fn delete(&self, id: &str) -> VerneResult<Option<ContentRecord>>;

    /// Distinct setting years across all records, ascending.
    async fn distinct_years(&self) -> VerneResult<Vec<i32>>;
}
