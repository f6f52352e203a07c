//! Wire types for the content API.
//!
//! External field names use camelCase (`contentType`, `textBody`, ...);
//! domain types stay snake_case internally. Image bytes never appear in
//! JSON bodies; records report `hasImage` and the image endpoint serves
//! the payload itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use verne_core::{ContentKind, ContentMetadata, ContentPatch, ContentRecord, ParameterSelections};
use verne_error::VerneResult;
use verne_generation::parse_kind;
use verne_interface::{ContentFilter, ContentSummary, DEFAULT_PAGE_LIMIT, PageRequest};

/// Body of a generation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    /// Requested content kind: `fiction`, `image`, or `combined`.
    pub content_type: String,
    /// Submitted parameter selections, vetted against the catalog.
    #[serde(default)]
    pub parameter_values: ParameterSelections,
    /// Narrative setting year override.
    #[serde(default)]
    pub setting_year: Option<i32>,
}

/// Body of a partial update.
///
/// Only supplied fields are applied; unknown fields are ignored rather
/// than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement prose body.
    pub text_body: Option<String>,
    /// Replacement setting year.
    pub setting_year: Option<i32>,
}

impl UpdateBody {
    /// Convert to the store's patch type.
    pub fn into_patch(self) -> ContentPatch {
        ContentPatch {
            title: self.title,
            body: self.text_body,
            setting_year: self.setting_year,
        }
    }
}

/// Query parameters accepted by the listing endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Filter by content kind.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Filter by setting year.
    pub year: Option<i32>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Items per page.
    pub limit: Option<i64>,
}

impl ListQuery {
    /// Resolve into a store filter and a normalized page request.
    ///
    /// An unrecognized `type` value is rejected the same way the generate
    /// endpoint rejects it.
    pub fn into_parts(self) -> VerneResult<(ContentFilter, PageRequest)> {
        let mut filter = ContentFilter::new();
        if let Some(kind) = self.kind.as_deref() {
            filter = filter.with_kind(parse_kind(kind)?);
        }
        if let Some(year) = self.year {
            filter = filter.with_year(year);
        }
        let page = PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        );
        Ok((filter, page))
    }
}

/// Full record as served over the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentView {
    /// Record identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Payload kind.
    pub content_type: ContentKind,
    /// Prose body for `fiction` and `combined` records.
    pub text_body: Option<String>,
    /// Whether the record carries an image payload.
    pub has_image: bool,
    /// Selections that produced this record.
    pub parameter_values: ParameterSelections,
    /// Generation provenance.
    pub metadata: ContentMetadata,
    /// Narrative setting year.
    pub setting_year: Option<i32>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp (UTC).
    pub updated_at: DateTime<Utc>,
}

impl From<ContentRecord> for ContentView {
    fn from(record: ContentRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            content_type: record.kind,
            text_body: record.body,
            has_image: record.image.is_some(),
            parameter_values: record.parameters,
            metadata: record.metadata,
            setting_year: record.setting_year,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Listing row as served over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    /// Record identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Payload kind.
    pub content_type: ContentKind,
    /// Whether the record carries an image payload.
    pub has_image: bool,
    /// Narrative setting year.
    pub setting_year: Option<i32>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp (UTC).
    pub updated_at: DateTime<Utc>,
}

impl From<ContentSummary> for SummaryView {
    fn from(summary: ContentSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            content_type: summary.kind,
            has_image: summary.has_image,
            setting_year: summary.setting_year,
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verne_core::{ContentKind, ImageBlob, ImageFormat};
    use verne_interface::MAX_PAGE_LIMIT;

    fn record() -> ContentRecord {
        ContentRecord {
            id: "abc123".to_string(),
            title: "Mars Dawn".to_string(),
            kind: ContentKind::Combined,
            body: Some("Dr. Vasquez stood at the airlock.".to_string()),
            image: Some(ImageBlob::new(vec![1, 2, 3], ImageFormat::Png)),
            parameters: ParameterSelections::new(),
            metadata: ContentMetadata::default(),
            setting_year: Some(2150),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn views_use_camel_case_and_omit_image_bytes() {
        let view = ContentView::from(record());
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"contentType\":\"combined\""));
        assert!(json.contains("\"textBody\""));
        assert!(json.contains("\"hasImage\":true"));
        assert!(json.contains("\"settingYear\":2150"));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("image_data"));
        assert!(!json.contains("\"bytes\""));
    }

    #[test]
    fn generate_body_defaults_optional_fields() {
        let body: GenerateBody = serde_json::from_str(r#"{"contentType":"fiction"}"#).unwrap();
        assert_eq!(body.content_type, "fiction");
        assert!(body.parameter_values.is_empty());
        assert!(body.setting_year.is_none());
    }

    #[test]
    fn update_body_ignores_unknown_fields() {
        let body: UpdateBody =
            serde_json::from_str(r#"{"title":"New","contentType":"image","color":"red"}"#).unwrap();
        let patch = body.into_patch();
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert!(patch.body.is_none());
        assert!(patch.setting_year.is_none());
    }

    #[test]
    fn list_query_resolves_filter_and_page() {
        let query = ListQuery {
            kind: Some("image".to_string()),
            year: Some(2150),
            page: Some(0),
            limit: Some(500),
        };
        let (filter, page) = query.into_parts().unwrap();
        assert_eq!(filter.kind, Some(ContentKind::Image));
        assert_eq!(filter.year, Some(2150));
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, MAX_PAGE_LIMIT);
    }

    #[test]
    fn list_query_rejects_unknown_kind() {
        let query = ListQuery {
            kind: Some("podcast".to_string()),
            ..Default::default()
        };
        assert!(query.into_parts().is_err());
    }

    #[test]
    fn empty_list_query_defaults() {
        let (filter, page) = ListQuery::default().into_parts().unwrap();
        assert_eq!(filter, ContentFilter::new());
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
    }
}
