//! Synchronous query functions for content records.
//!
//! Every function takes a borrowed connection so callers control pooling
//! and blocking-thread placement; the async adapter in `store` wraps these
//! in `spawn_blocking`.

use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use verne_core::{ContentDraft, ContentPatch, truncate_chars};
use verne_interface::{ContentFilter, ContentSummary, PageRequest};

use crate::models::{ContentRecordChangeset, ContentRecordRow, NewContentRecordRow};
use crate::{DatabaseResult, schema::content_records};

/// Raw column tuple selected for summary listings.
///
/// `image_data` itself is never selected, only its presence, so summary
/// pages stay cheap no matter how large the stored blobs are.
type SummaryRow = (
    String,
    String,
    String,
    bool,
    Option<i32>,
    chrono::NaiveDateTime,
    chrono::NaiveDateTime,
);

/// Insert or overwrite a content record.
///
/// Drafts without an id receive a fresh one; saving an existing id
/// replaces the stored payloads while keeping the original `created_at`.
pub fn save_content(
    conn: &mut PgConnection,
    draft: ContentDraft,
    max_body_chars: usize,
) -> DatabaseResult<ContentRecordRow> {
    let new_row = NewContentRecordRow::from_draft(draft, max_body_chars)?;

    diesel::insert_into(content_records::table)
        .values(&new_row)
        .on_conflict(content_records::id)
        .do_update()
        .set((
            content_records::title.eq(&new_row.title),
            content_records::content_kind.eq(&new_row.content_kind),
            content_records::body.eq(&new_row.body),
            content_records::image_data.eq(&new_row.image_data),
            content_records::image_format.eq(&new_row.image_format),
            content_records::parameters.eq(&new_row.parameters),
            content_records::metadata.eq(&new_row.metadata),
            content_records::setting_year.eq(new_row.setting_year),
            content_records::updated_at.eq(new_row.updated_at),
        ))
        .get_result(conn)
        .map_err(Into::into)
}

/// Load a record by id.
pub fn get_content_by_id(
    conn: &mut PgConnection,
    record_id: &str,
) -> DatabaseResult<Option<ContentRecordRow>> {
    content_records::table
        .find(record_id)
        .first(conn)
        .optional()
        .map_err(Into::into)
}

/// Count records matching the filter.
pub fn count_content(conn: &mut PgConnection, filter: &ContentFilter) -> DatabaseResult<i64> {
    let mut query = content_records::table.into_boxed();

    if let Some(kind) = filter.kind {
        query = query.filter(content_records::content_kind.eq(kind.as_str()));
    }
    if let Some(year) = filter.year {
        query = query.filter(content_records::setting_year.eq(year));
    }

    query.count().get_result(conn).map_err(Into::into)
}

/// List full rows matching the filter, newest first.
///
/// Ties on `created_at` break by id descending so page concatenation is
/// stable under concurrent writes.
pub fn list_content(
    conn: &mut PgConnection,
    filter: &ContentFilter,
    page: &PageRequest,
) -> DatabaseResult<Vec<ContentRecordRow>> {
    let page = page.normalize();
    let mut query = content_records::table.into_boxed();

    if let Some(kind) = filter.kind {
        query = query.filter(content_records::content_kind.eq(kind.as_str()));
    }
    if let Some(year) = filter.year {
        query = query.filter(content_records::setting_year.eq(year));
    }

    query
        .order(content_records::created_at.desc())
        .then_order_by(content_records::id.desc())
        .limit(page.limit)
        .offset(page.offset())
        .load(conn)
        .map_err(Into::into)
}

/// List summary projections matching the filter, newest first.
pub fn list_content_summaries(
    conn: &mut PgConnection,
    filter: &ContentFilter,
    page: &PageRequest,
) -> DatabaseResult<Vec<ContentSummary>> {
    let page = page.normalize();
    let mut query = content_records::table
        .select((
            content_records::id,
            content_records::title,
            content_records::content_kind,
            content_records::image_data.is_not_null(),
            content_records::setting_year,
            content_records::created_at,
            content_records::updated_at,
        ))
        .into_boxed();

    if let Some(kind) = filter.kind {
        query = query.filter(content_records::content_kind.eq(kind.as_str()));
    }
    if let Some(year) = filter.year {
        query = query.filter(content_records::setting_year.eq(year));
    }

    let rows: Vec<SummaryRow> = query
        .order(content_records::created_at.desc())
        .then_order_by(content_records::id.desc())
        .limit(page.limit)
        .offset(page.offset())
        .load(conn)?;

    rows.into_iter()
        .map(|(id, title, kind, has_image, setting_year, created_at, updated_at)| {
            let kind = kind.parse().map_err(|_| {
                verne_error::DatabaseError::new(verne_error::DatabaseErrorKind::Serialization(
                    format!("unknown content kind on record {}", id),
                ))
            })?;
            Ok(ContentSummary {
                id,
                title,
                kind,
                has_image,
                setting_year,
                created_at: created_at.and_utc(),
                updated_at: updated_at.and_utc(),
            })
        })
        .collect()
}

/// Load the image columns for a record.
///
/// `None` means the record does not exist; `Some((None, _))` means it
/// exists without an image.
pub fn get_content_image(
    conn: &mut PgConnection,
    record_id: &str,
) -> DatabaseResult<Option<(Option<Vec<u8>>, Option<String>)>> {
    content_records::table
        .find(record_id)
        .select((content_records::image_data, content_records::image_format))
        .first(conn)
        .optional()
        .map_err(Into::into)
}

/// Apply a partial update, bumping `updated_at`.
///
/// An empty patch is a no-op read; the record is returned untouched.
pub fn update_content(
    conn: &mut PgConnection,
    record_id: &str,
    patch: ContentPatch,
    max_body_chars: usize,
) -> DatabaseResult<Option<ContentRecordRow>> {
    if patch.is_empty() {
        return get_content_by_id(conn, record_id);
    }

    let changeset = ContentRecordChangeset {
        title: patch.title,
        body: patch.body.map(|b| truncate_chars(&b, max_body_chars)),
        setting_year: patch.setting_year,
        updated_at: Utc::now().naive_utc(),
    };

    diesel::update(content_records::table.find(record_id))
        .set(&changeset)
        .get_result(conn)
        .optional()
        .map_err(Into::into)
}

/// Delete a record, returning the deleted row.
pub fn delete_content(
    conn: &mut PgConnection,
    record_id: &str,
) -> DatabaseResult<Option<ContentRecordRow>> {
    diesel::delete(content_records::table.find(record_id))
        .get_result(conn)
        .optional()
        .map_err(Into::into)
}

/// Distinct non-null setting years, ascending.
pub fn distinct_setting_years(conn: &mut PgConnection) -> DatabaseResult<Vec<i32>> {
    let years: Vec<Option<i32>> = content_records::table
        .select(content_records::setting_year)
        .filter(content_records::setting_year.is_not_null())
        .distinct()
        .order(content_records::setting_year.asc())
        .load(conn)?;

    Ok(years.into_iter().flatten().collect())
}
