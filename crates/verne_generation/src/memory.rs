//! In-memory implementations of the storage and catalog traits.
//!
//! HashMap-backed stands-in for the database-backed store and for an
//! external parameter catalog. Useful for unit tests and for running
//! the pipeline without PostgreSQL.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use verne_core::{
    ContentDraft, ContentPatch, ContentRecord, MAX_BODY_CHARS, ParameterDefinition, default_title,
    new_content_id, truncate_chars,
};
use verne_error::VerneResult;
use verne_interface::{
    ContentFilter, ContentStore, ContentSummary, ImageLookup, Page, PageRequest, Pagination,
    ParameterSource,
};

/// In-memory content store.
///
/// Records live in a HashMap protected by an RwLock for thread-safe
/// access. All data is lost when the store is dropped.
///
/// # Example
/// ```no_run
/// use verne_generation::MemoryContentStore;
/// use verne_interface::ContentStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = MemoryContentStore::new();
///     // Use store.save(), store.get(), etc.
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    /// Storage for records, keyed by ID
    records: Arc<RwLock<HashMap<String, ContentRecord>>>,
}

impl MemoryContentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored records (for testing).
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Check if the store is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Clear all records (for testing).
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Records matching the filter, newest first with id as tiebreak.
    async fn matching(&self, filter: &ContentFilter) -> Vec<ContentRecord> {
        let records = self.records.read().await;
        let mut results: Vec<ContentRecord> = records
            .values()
            .filter(|record| {
                if let Some(kind) = filter.kind
                    && record.kind != kind
                {
                    return false;
                }

                if let Some(year) = filter.year
                    && record.setting_year != Some(year)
                {
                    return false;
                }

                true
            })
            .cloned()
            .collect();

        results.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        results
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn save(&self, draft: ContentDraft) -> VerneResult<ContentRecord> {
        let now = Utc::now();
        let id = draft.id.unwrap_or_else(new_content_id);

        let mut records = self.records.write().await;
        let created_at = records
            .get(&id)
            .map(|existing| existing.created_at)
            .unwrap_or(now);

        let record = ContentRecord {
            id: id.clone(),
            title: draft.title.unwrap_or_else(|| default_title(draft.kind)),
            kind: draft.kind,
            body: draft.body.map(|b| truncate_chars(&b, MAX_BODY_CHARS)),
            image: draft.image,
            parameters: draft.parameters,
            metadata: draft.metadata,
            setting_year: draft.setting_year,
            created_at,
            updated_at: now,
        };
        records.insert(id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: &str) -> VerneResult<Option<ContentRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list(
        &self,
        filter: &ContentFilter,
        page: &PageRequest,
    ) -> VerneResult<Page<ContentRecord>> {
        let results = self.matching(filter).await;
        let total = results.len() as i64;
        let request = page.normalize();
        let items = results
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit as usize)
            .collect();
        Ok(Page::new(items, Pagination::compute(&request, total)))
    }

    async fn list_summaries(
        &self,
        filter: &ContentFilter,
        page: &PageRequest,
    ) -> VerneResult<Page<ContentSummary>> {
        let full = self.list(filter, page).await?;
        Ok(full.map(|record| ContentSummary {
            id: record.id,
            title: record.title,
            kind: record.kind,
            has_image: record.image.is_some(),
            setting_year: record.setting_year,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }))
    }

    async fn image(&self, id: &str) -> VerneResult<ImageLookup> {
        let records = self.records.read().await;
        Ok(match records.get(id) {
            None => ImageLookup::NotFound,
            Some(record) => match &record.image {
                Some(blob) => ImageLookup::Found(blob.clone()),
                None => ImageLookup::NoImage,
            },
        })
    }

    async fn update(&self, id: &str, patch: ContentPatch) -> VerneResult<Option<ContentRecord>> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(id) else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(record.clone()));
        }

        if let Some(title) = patch.title {
            record.title = title;
        }
        if let Some(body) = patch.body {
            record.body = Some(truncate_chars(&body, MAX_BODY_CHARS));
        }
        if let Some(year) = patch.setting_year {
            record.setting_year = Some(year);
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &str) -> VerneResult<Option<ContentRecord>> {
        Ok(self.records.write().await.remove(id))
    }

    async fn distinct_years(&self) -> VerneResult<Vec<i32>> {
        let records = self.records.read().await;
        let years: BTreeSet<i32> = records.values().filter_map(|r| r.setting_year).collect();
        Ok(years.into_iter().collect())
    }
}

/// Parameter catalog backed by a fixed in-memory table.
///
/// Backs config-declared catalogs and test fixtures when no external
/// catalog service is wired in.
#[derive(Debug, Clone, Default)]
pub struct StaticParameterSource {
    /// Declared parameters, keyed by category id
    categories: HashMap<String, Vec<ParameterDefinition>>,
}

impl StaticParameterSource {
    /// Create an empty catalog; every category is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a category and its parameters.
    pub fn with_category(
        mut self,
        category_id: impl Into<String>,
        parameters: Vec<ParameterDefinition>,
    ) -> Self {
        self.categories.insert(category_id.into(), parameters);
        self
    }
}

#[async_trait]
impl ParameterSource for StaticParameterSource {
    async fn category_parameters(
        &self,
        category_id: &str,
    ) -> VerneResult<Option<Vec<ParameterDefinition>>> {
        Ok(self.categories.get(category_id).cloned())
    }
}
