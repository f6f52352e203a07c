//! Diesel models for the content_records table.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use tracing::warn;
use verne_core::{
    ContentDraft, ContentKind, ContentMetadata, ContentRecord, ImageBlob, ImageFormat,
    ParameterSelections, default_title, new_content_id, truncate_chars,
};
use verne_error::{DatabaseError, DatabaseErrorKind};

use crate::DatabaseResult;

/// Database row for the content_records table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::content_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContentRecordRow {
    pub id: String,
    pub title: String,
    pub content_kind: String,
    pub body: Option<String>,
    pub image_data: Option<Vec<u8>>,
    pub image_format: Option<String>,
    pub parameters: String,
    pub metadata: String,
    pub setting_year: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable struct for the content_records table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::content_records)]
pub struct NewContentRecordRow {
    pub id: String,
    pub title: String,
    pub content_kind: String,
    pub body: Option<String>,
    pub image_data: Option<Vec<u8>>,
    pub image_format: Option<String>,
    pub parameters: String,
    pub metadata: String,
    pub setting_year: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changeset for partial updates; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::content_records)]
pub struct ContentRecordChangeset {
    pub title: Option<String>,
    pub body: Option<String>,
    pub setting_year: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl NewContentRecordRow {
    /// Flatten a draft into an insertable row, filling server-assigned
    /// fields and serializing the nested payloads to JSON text.
    pub fn from_draft(draft: ContentDraft, max_body_chars: usize) -> DatabaseResult<Self> {
        let now = Utc::now().naive_utc();
        let id = draft.id.unwrap_or_else(new_content_id);
        let title = draft.title.unwrap_or_else(|| default_title(draft.kind));
        let body = draft
            .body
            .map(|b| truncate_chars(&b, max_body_chars));
        let (image_data, image_format) = match draft.image {
            Some(blob) => (Some(blob.bytes), Some(blob.format.to_string())),
            None => (None, None),
        };
        let parameters = serde_json::to_string(&draft.parameters)?;
        let metadata = serde_json::to_string(&draft.metadata)?;

        Ok(Self {
            id,
            title,
            content_kind: draft.kind.as_str().to_string(),
            body,
            image_data,
            image_format,
            parameters,
            metadata,
            setting_year: draft.setting_year,
            created_at: now,
            updated_at: now,
        })
    }
}

impl ContentRecordRow {
    /// Reconstruct the domain record from a stored row.
    ///
    /// Corrupt serialized payloads degrade rather than abort: parameters
    /// and metadata fall back to their empty forms with a warning, and a
    /// missing format hint is re-sniffed from the image bytes. An unknown
    /// content kind is real corruption and surfaces as an error.
    pub fn into_record(self) -> DatabaseResult<ContentRecord> {
        let kind: ContentKind = self.content_kind.parse().map_err(|_| {
            DatabaseError::new(DatabaseErrorKind::Serialization(format!(
                "unknown content kind {:?} on record {}",
                self.content_kind, self.id
            )))
        })?;

        let parameters: ParameterSelections = match serde_json::from_str(&self.parameters) {
            Ok(parameters) => parameters,
            Err(e) => {
                warn!(id = %self.id, error = %e, "corrupt parameters payload, substituting empty");
                ParameterSelections::default()
            }
        };

        let metadata: ContentMetadata = match serde_json::from_str(&self.metadata) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(id = %self.id, error = %e, "corrupt metadata payload, substituting empty");
                ContentMetadata::default()
            }
        };

        let format_hint = self
            .image_format
            .as_deref()
            .and_then(|s| s.parse::<ImageFormat>().ok());
        let image = self.image_data.map(|bytes| {
            let format = format_hint.unwrap_or_else(|| ImageFormat::detect(&bytes));
            ImageBlob::new(bytes, format)
        });

        Ok(ContentRecord {
            id: self.id,
            title: self.title,
            kind,
            body: self.body,
            image,
            parameters,
            metadata,
            setting_year: self.setting_year,
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verne_core::{ContentKind, FictionMetadata};

    fn sample_row() -> ContentRecordRow {
        let now = Utc::now().naive_utc();
        ContentRecordRow {
            id: "18f2a9c4ab12cd34".to_string(),
            title: "Mars Dawn".to_string(),
            content_kind: "combined".to_string(),
            body: Some("Dr. Vasquez stood at the viewport.".to_string()),
            image_data: Some(vec![0x89, 0x50, 0x4E, 0x47]),
            image_format: Some("png".to_string()),
            parameters: "{}".to_string(),
            metadata: "{}".to_string(),
            setting_year: Some(2150),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_reconstructs_record() {
        let record = sample_row().into_record().unwrap();
        assert_eq!(record.kind, ContentKind::Combined);
        assert_eq!(record.setting_year, Some(2150));
        assert_eq!(record.image.unwrap().format, ImageFormat::Png);
        assert!(record.metadata.is_empty());
    }

    #[test]
    fn corrupt_metadata_degrades_to_empty() {
        let mut row = sample_row();
        row.metadata = "{not json".to_string();
        let record = row.into_record().unwrap();
        assert!(record.metadata.is_empty());
    }

    #[test]
    fn corrupt_parameters_degrade_to_empty() {
        let mut row = sample_row();
        row.parameters = "[1,".to_string();
        let record = row.into_record().unwrap();
        assert!(record.parameters.is_empty());
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let mut row = sample_row();
        row.content_kind = "sonnet".to_string();
        assert!(row.into_record().is_err());
    }

    #[test]
    fn missing_format_hint_is_sniffed() {
        let mut row = sample_row();
        row.image_format = None;
        row.image_data = Some(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        let record = row.into_record().unwrap();
        assert_eq!(record.image.unwrap().format, ImageFormat::Jpeg);
    }

    #[test]
    fn draft_flattening_truncates_and_serializes() {
        let mut draft = ContentDraft::new(ContentKind::Fiction);
        draft.body = Some("abcdefghij".to_string());
        draft.metadata = ContentMetadata::Fiction(FictionMetadata {
            model: "gpt-4o-mini".to_string(),
            total_tokens: None,
            word_count: 2,
        });
        let row = NewContentRecordRow::from_draft(draft, 5).unwrap();
        assert_eq!(row.body.as_deref(), Some("abcde"));
        assert!(!row.id.is_empty());
        assert!(row.title.starts_with("Untitled fiction"));
        assert!(row.metadata.contains("wordCount"));
        assert_eq!(row.created_at, row.updated_at);
    }
}
