//! Content records, drafts, and image payloads.

use crate::{ContentMetadata, ParameterSelections};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on stored prose length, in characters.
///
/// Bodies longer than this are truncated on save rather than rejected.
pub const MAX_BODY_CHARS: usize = 50_000;

/// The kind of content a record holds.
///
/// The kind is fixed at creation and gates which payload fields may be
/// present: `Fiction` carries prose only, `Image` carries an image only,
/// and `Combined` carries both.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use verne_core::ContentKind;
///
/// assert_eq!(ContentKind::from_str("combined").unwrap(), ContentKind::Combined);
/// assert_eq!(ContentKind::Fiction.as_str(), "fiction");
/// assert!(ContentKind::from_str("podcast").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentKind {
    /// Prose only.
    Fiction,
    /// Image only.
    Image,
    /// Prose plus an accompanying image.
    Combined,
}

impl ContentKind {
    /// Convert to string representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Fiction => "fiction",
            ContentKind::Image => "image",
            ContentKind::Combined => "combined",
        }
    }

    /// Whether records of this kind carry prose.
    pub fn has_body(&self) -> bool {
        matches!(self, ContentKind::Fiction | ContentKind::Combined)
    }

    /// Whether records of this kind carry an image.
    pub fn has_image(&self) -> bool {
        matches!(self, ContentKind::Image | ContentKind::Combined)
    }
}

/// Raster format of a stored or generated image.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageFormat {
    /// Portable Network Graphics.
    Png,
    /// JPEG/JFIF.
    Jpeg,
    /// WebP.
    Webp,
    /// GIF.
    Gif,
}

impl ImageFormat {
    /// MIME type for HTTP responses.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Webp => "webp",
            ImageFormat::Gif => "gif",
        }
    }

    /// Detect the format from the payload's magic bytes.
    ///
    /// Providers do not always report the encoding of the bytes they return,
    /// so the sniff falls back to PNG when no signature matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use verne_core::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::detect(&[0x89, b'P', b'N', b'G']), ImageFormat::Png);
    /// assert_eq!(ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageFormat::Jpeg);
    /// assert_eq!(ImageFormat::detect(b"unrecognized"), ImageFormat::Png);
    /// ```
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            ImageFormat::Png
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            ImageFormat::Jpeg
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            ImageFormat::Webp
        } else if bytes.starts_with(b"GIF8") {
            ImageFormat::Gif
        } else {
            ImageFormat::Png
        }
    }
}

/// Raw image bytes plus their detected format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlob {
    /// Encoded image data.
    pub bytes: Vec<u8>,
    /// Raster format of `bytes`.
    pub format: ImageFormat,
}

impl ImageBlob {
    /// Create a blob with an explicit format.
    pub fn new(bytes: Vec<u8>, format: ImageFormat) -> Self {
        Self { bytes, format }
    }

    /// Create a blob, sniffing the format from the payload.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let format = ImageFormat::detect(&bytes);
        Self { bytes, format }
    }

    /// Size of the encoded payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A stored piece of generated content.
///
/// Records are created by the generation pipeline after a successful provider
/// round trip, and mutated only through the store's `update` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Opaque unique identifier, fixed at creation.
    pub id: String,
    /// Display title, extracted from the prose or assigned a placeholder.
    pub title: String,
    /// Payload kind, fixed at creation.
    pub kind: ContentKind,
    /// Prose body for `fiction` and `combined` records.
    pub body: Option<String>,
    /// Image payload for `image` and `combined` records.
    pub image: Option<ImageBlob>,
    /// User selections that produced this record, keyed by category then
    /// parameter identifier.
    pub parameters: ParameterSelections,
    /// Provenance describing how the payloads were generated.
    pub metadata: ContentMetadata,
    /// Narrative setting year, supplied by the caller or mined from the prose.
    pub setting_year: Option<i32>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp (UTC), advanced on every successful update.
    pub updated_at: DateTime<Utc>,
}

impl ContentRecord {
    /// Whether the record carries an image payload.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// Input to a content store's `save` operation.
///
/// Fields left unset are assigned by the store: a fresh [`new_content_id`],
/// a [`default_title`] placeholder, and creation timestamps.
///
/// # Examples
///
/// ```
/// use verne_core::{ContentDraft, ContentKind};
///
/// let mut draft = ContentDraft::new(ContentKind::Fiction);
/// draft.body = Some("In the year 2150...".to_string());
/// assert!(draft.id.is_none());
/// assert_eq!(draft.kind, ContentKind::Fiction);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDraft {
    /// Record identifier; `None` asks the store to mint one.
    pub id: Option<String>,
    /// Display title; `None` asks the store for a placeholder.
    pub title: Option<String>,
    /// Payload kind.
    pub kind: ContentKind,
    /// Prose body.
    pub body: Option<String>,
    /// Image payload.
    pub image: Option<ImageBlob>,
    /// Accepted user selections.
    pub parameters: ParameterSelections,
    /// Generation provenance.
    pub metadata: ContentMetadata,
    /// Narrative setting year.
    pub setting_year: Option<i32>,
}

impl ContentDraft {
    /// Create an empty draft of the given kind.
    pub fn new(kind: ContentKind) -> Self {
        Self {
            id: None,
            title: None,
            kind,
            body: None,
            image: None,
            parameters: ParameterSelections::new(),
            metadata: ContentMetadata::default(),
            setting_year: None,
        }
    }
}

/// Partial update for a stored record.
///
/// Only supplied fields are applied. The record's kind, parameters, and
/// metadata are not mutable after creation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement prose body.
    pub body: Option<String>,
    /// Replacement setting year.
    pub setting_year: Option<i32>,
}

impl ContentPatch {
    /// Whether the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.setting_year.is_none()
    }
}

/// Mint a fresh content identifier.
///
/// The identifier is the creation time in milliseconds rendered as lowercase
/// hex, followed by an 8-character random suffix, so ids sort roughly by
/// creation time while staying collision safe under concurrent writers.
///
/// # Examples
///
/// ```
/// let a = verne_core::new_content_id();
/// let b = verne_core::new_content_id();
/// assert_ne!(a, b);
/// ```
pub fn new_content_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{:x}{}", millis, &suffix[..8])
}

/// Placeholder title for drafts that did not carry one.
pub fn default_title(kind: ContentKind) -> String {
    format!("Untitled {} {}", kind, Utc::now().format("%Y-%m-%d %H:%M"))
}

/// Truncate a string to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_strings() {
        for kind in [ContentKind::Fiction, ContentKind::Image, ContentKind::Combined] {
            let parsed: ContentKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn kind_gates_payloads() {
        assert!(ContentKind::Fiction.has_body());
        assert!(!ContentKind::Fiction.has_image());
        assert!(!ContentKind::Image.has_body());
        assert!(ContentKind::Image.has_image());
        assert!(ContentKind::Combined.has_body());
        assert!(ContentKind::Combined.has_image());
    }

    #[test]
    fn detects_webp_from_riff_header() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes.extend_from_slice(b"WEBP");
        assert_eq!(ImageFormat::detect(&bytes), ImageFormat::Webp);
    }

    #[test]
    fn detects_gif_header() {
        assert_eq!(ImageFormat::detect(b"GIF89a"), ImageFormat::Gif);
    }

    #[test]
    fn blob_sniffs_format() {
        let blob = ImageBlob::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00]);
        assert_eq!(blob.format, ImageFormat::Jpeg);
        assert_eq!(blob.len(), 5);
    }

    #[test]
    fn content_ids_are_unique_and_hex_prefixed() {
        let id = new_content_id();
        assert!(id.len() > 8);
        let prefix = &id[..id.len() - 8];
        assert!(prefix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(new_content_id(), new_content_id());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn default_titles_name_the_kind() {
        let title = default_title(ContentKind::Combined);
        assert!(title.starts_with("Untitled combined "));
    }

    #[test]
    fn empty_patch_reports_empty() {
        assert!(ContentPatch::default().is_empty());
        let patch = ContentPatch {
            title: Some("New".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
