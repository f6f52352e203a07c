//! Async `ContentStore` implementation backed by PostgreSQL.

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::instrument;
use verne_core::{
    ContentDraft, ContentPatch, ContentRecord, ImageBlob, ImageFormat, MAX_BODY_CHARS,
};
use verne_error::{DatabaseError, DatabaseErrorKind, VerneResult};
use verne_interface::{
    ContentFilter, ContentStore, ContentSummary, ImageLookup, Page, PageRequest, Pagination,
};

use crate::content_management;

/// PostgreSQL-backed content store.
///
/// Holds an r2d2 connection pool; each operation checks out a connection on
/// a blocking thread so Diesel's synchronous queries never stall the async
/// runtime.
///
/// # Example
/// ```no_run
/// use verne_database::{PgContentStore, build_pool};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = build_pool()?;
/// let store = PgContentStore::new(pool);
/// // Use store.save(), store.list(), etc.
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PgContentStore {
    pool: Pool<ConnectionManager<PgConnection>>,
    max_body_chars: usize,
}

impl PgContentStore {
    /// Create a store over the given connection pool.
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self {
            pool,
            max_body_chars: MAX_BODY_CHARS,
        }
    }

    /// Override the prose truncation bound applied on save.
    pub fn with_max_body_chars(mut self, max_body_chars: usize) -> Self {
        self.max_body_chars = max_body_chars;
        self
    }

    /// Check out a pooled connection on a blocking thread and run `job`.
    async fn run<T, F>(&self, job: F) -> VerneResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> crate::DatabaseResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;
            job(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;

        result.map_err(Into::into)
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    #[instrument(skip(self, draft), fields(kind = %draft.kind))]
    async fn save(&self, draft: ContentDraft) -> VerneResult<ContentRecord> {
        let max_body_chars = self.max_body_chars;
        let row = self
            .run(move |conn| content_management::save_content(conn, draft, max_body_chars))
            .await?;
        Ok(row.into_record()?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> VerneResult<Option<ContentRecord>> {
        let id = id.to_string();
        let row = self
            .run(move |conn| content_management::get_content_by_id(conn, &id))
            .await?;
        match row {
            Some(row) => Ok(Some(row.into_record()?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &ContentFilter,
        page: &PageRequest,
    ) -> VerneResult<Page<ContentRecord>> {
        let filter = *filter;
        let page = page.normalize();
        let (rows, total) = self
            .run(move |conn| {
                let total = content_management::count_content(conn, &filter)?;
                let rows = content_management::list_content(conn, &filter, &page)?;
                Ok((rows, total))
            })
            .await?;

        let items = rows
            .into_iter()
            .map(|row| row.into_record())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, Pagination::compute(&page, total)))
    }

    #[instrument(skip(self))]
    async fn list_summaries(
        &self,
        filter: &ContentFilter,
        page: &PageRequest,
    ) -> VerneResult<Page<ContentSummary>> {
        let filter = *filter;
        let page = page.normalize();
        let (items, total) = self
            .run(move |conn| {
                let total = content_management::count_content(conn, &filter)?;
                let items = content_management::list_content_summaries(conn, &filter, &page)?;
                Ok((items, total))
            })
            .await?;

        Ok(Page::new(items, Pagination::compute(&page, total)))
    }

    #[instrument(skip(self))]
    async fn image(&self, id: &str) -> VerneResult<ImageLookup> {
        let id = id.to_string();
        let result = self
            .run(move |conn| content_management::get_content_image(conn, &id))
            .await?;

        Ok(match result {
            None => ImageLookup::NotFound,
            Some((None, _)) => ImageLookup::NoImage,
            Some((Some(bytes), format)) => {
                let format = format
                    .as_deref()
                    .and_then(|s| s.parse::<ImageFormat>().ok())
                    .unwrap_or_else(|| ImageFormat::detect(&bytes));
                ImageLookup::Found(ImageBlob::new(bytes, format))
            }
        })
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: ContentPatch) -> VerneResult<Option<ContentRecord>> {
        let id = id.to_string();
        let max_body_chars = self.max_body_chars;
        let row = self
            .run(move |conn| content_management::update_content(conn, &id, patch, max_body_chars))
            .await?;
        match row {
            Some(row) => Ok(Some(row.into_record()?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> VerneResult<Option<ContentRecord>> {
        let id = id.to_string();
        let row = self
            .run(move |conn| content_management::delete_content(conn, &id))
            .await?;
        match row {
            Some(row) => Ok(Some(row.into_record()?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn distinct_years(&self) -> VerneResult<Vec<i32>> {
        self.run(content_management::distinct_setting_years).await
    }
}
