//! Generation provenance stored alongside content records.

use serde::{Deserialize, Serialize};

/// Provenance for a generated prose body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FictionMetadata {
    /// Model that produced the prose.
    pub model: String,
    /// Token usage reported by the provider, when available.
    pub total_tokens: Option<u32>,
    /// Whitespace-delimited word count of the stored body.
    pub word_count: u32,
}

/// Provenance for a generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    /// Model that rendered the image.
    pub model: String,
    /// Excerpt of the resolved image prompt.
    pub prompt: String,
}

/// Provenance for a content record, shaped by the record's kind.
///
/// The wire shape is untagged; variant order matters for deserialization.
/// `Combined` requires both sub-objects, `Fiction` and `Image` match their
/// field sets, and `Empty` absorbs anything else so a malformed stored
/// payload degrades instead of failing a listing.
///
/// # Examples
///
/// ```
/// use verne_core::ContentMetadata;
///
/// let parsed: ContentMetadata =
///     serde_json::from_str(r#"{"model":"gpt-image-1","prompt":"a red dome"}"#).unwrap();
/// assert!(parsed.image().is_some());
///
/// let stale: ContentMetadata = serde_json::from_str(r#"{"legacy":1}"#).unwrap();
/// assert_eq!(stale, ContentMetadata::Empty {});
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentMetadata {
    /// Both payloads of a combined record.
    Combined {
        /// Prose provenance.
        fiction: FictionMetadata,
        /// Image provenance.
        image: ImageMetadata,
    },
    /// Prose-only provenance.
    Fiction(FictionMetadata),
    /// Image-only provenance.
    Image(ImageMetadata),
    /// No provenance recorded.
    Empty {},
}

impl Default for ContentMetadata {
    fn default() -> Self {
        ContentMetadata::Empty {}
    }
}

impl ContentMetadata {
    /// Borrow the prose provenance when present.
    pub fn fiction(&self) -> Option<&FictionMetadata> {
        match self {
            ContentMetadata::Combined { fiction, .. } => Some(fiction),
            ContentMetadata::Fiction(fiction) => Some(fiction),
            _ => None,
        }
    }

    /// Borrow the image provenance when present.
    pub fn image(&self) -> Option<&ImageMetadata> {
        match self {
            ContentMetadata::Combined { image, .. } => Some(image),
            ContentMetadata::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Whether no provenance was recorded.
    pub fn is_empty(&self) -> bool {
        matches!(self, ContentMetadata::Empty {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fiction() -> FictionMetadata {
        FictionMetadata {
            model: "gpt-4o-mini".to_string(),
            total_tokens: Some(812),
            word_count: 604,
        }
    }

    fn image() -> ImageMetadata {
        ImageMetadata {
            model: "gpt-image-1".to_string(),
            prompt: "An illustration for a speculative fiction story".to_string(),
        }
    }

    #[test]
    fn combined_round_trips_with_camel_case_keys() {
        let metadata = ContentMetadata::Combined {
            fiction: fiction(),
            image: image(),
        };
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("\"totalTokens\":812"));
        assert!(json.contains("\"wordCount\":604"));
        let parsed: ContentMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metadata);
    }

    #[test]
    fn fiction_only_does_not_match_image_variant() {
        let json = serde_json::to_string(&ContentMetadata::Fiction(fiction())).unwrap();
        let parsed: ContentMetadata = serde_json::from_str(&json).unwrap();
        assert!(parsed.fiction().is_some());
        assert!(parsed.image().is_none());
    }

    #[test]
    fn unknown_shapes_degrade_to_empty() {
        let parsed: ContentMetadata =
            serde_json::from_str(r#"{"engine":"legacy","v":2}"#).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn empty_serializes_as_bare_object() {
        let json = serde_json::to_string(&ContentMetadata::Empty {}).unwrap();
        assert_eq!(json, "{}");
    }
}
