//! Filter, pagination, and projection types for content queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use verne_core::{ContentKind, ImageBlob};

/// Default number of items per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Hard ceiling on items per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Filter criteria for content listings.
///
/// All fields are optional; combining multiple criteria creates an AND
/// condition.
///
/// # Examples
///
/// ```
/// use verne_core::ContentKind;
/// use verne_interface::ContentFilter;
///
/// let filter = ContentFilter::new()
///     .with_kind(ContentKind::Combined)
///     .with_year(2150);
/// assert_eq!(filter.year, Some(2150));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFilter {
    /// Filter by content kind (exact match).
    pub kind: Option<ContentKind>,
    /// Filter by setting year (exact match).
    pub year: Option<i32>,
}

impl ContentFilter {
    /// Create an empty filter (matches all records).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by content kind.
    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter by setting year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// Requested slice of a listing.
///
/// Out-of-range requests are normalized rather than rejected: pages below 1
/// become page 1 and limits are clamped to `1..=`[`MAX_PAGE_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    /// Items per page.
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Create a page request, normalizing out-of-range values.
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }.normalize()
    }

    /// Clamp the request into the supported range.
    pub fn normalize(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        let normalized = self.normalize();
        (normalized.page - 1) * normalized.limit
    }
}

/// Pagination metadata reported alongside every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number served.
    pub page: i64,
    /// Items per page served.
    pub limit: i64,
    /// Total matching items across all pages.
    pub total: i64,
    /// Total number of pages at this limit.
    pub total_pages: i64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

impl Pagination {
    /// Compute pagination metadata for a request against a total count.
    ///
    /// # Examples
    ///
    /// ```
    /// use verne_interface::{PageRequest, Pagination};
    ///
    /// let meta = Pagination::compute(&PageRequest::new(2, 10), 25);
    /// assert_eq!(meta.total_pages, 3);
    /// assert!(meta.has_next);
    /// assert!(meta.has_prev);
    /// ```
    pub fn compute(request: &PageRequest, total: i64) -> Self {
        let request = request.normalize();
        let total = total.max(0);
        let total_pages = if total == 0 {
            0
        } else {
            (total + request.limit - 1) / request.limit
        };
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}

/// One page of results plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in listing order.
    pub items: Vec<T>,
    /// Position of this page within the full result set.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Assemble a page.
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// Map the items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Lightweight listing row without payload fields.
///
/// Used by `list_summaries` to report what exists without loading prose
/// bodies or image blobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSummary {
    /// Record identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Payload kind.
    pub kind: ContentKind,
    /// Whether the record carries an image payload.
    pub has_image: bool,
    /// Narrative setting year, when recorded.
    pub setting_year: Option<i32>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp (UTC).
    pub updated_at: DateTime<Utc>,
}

/// Result of an image lookup.
///
/// A record can be missing outright or present without an image; the two
/// cases get different answers at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLookup {
    /// The record exists and carries an image.
    Found(ImageBlob),
    /// The record exists but has no image payload.
    NoImage,
    /// No record with the requested id.
    NotFound,
}
