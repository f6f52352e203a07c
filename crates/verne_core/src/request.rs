//! Request and response types for the generative providers.

use crate::ImageFormat;
use serde::{Deserialize, Serialize};

/// A single text-completion request.
///
/// # Examples
///
/// ```
/// use verne_core::TextRequestBuilder;
///
/// let request = TextRequestBuilder::default()
///     .model("gpt-4o-mini")
///     .system("You are a fiction writer.")
///     .prompt("Write a story about a drowned city.")
///     .temperature(0.9_f32)
///     .max_tokens(2048_u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.model, "gpt-4o-mini");
/// assert_eq!(request.max_tokens, Some(2048));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(setter(into, strip_option), default)]
pub struct TextRequest {
    /// Model identifier to use.
    pub model: String,
    /// System instruction framing the completion.
    pub system: Option<String>,
    /// The user prompt.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,
}

/// A text-completion response, normalized across providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextResponse {
    /// The generated completion text.
    pub text: String,
    /// Model the provider reports having used.
    pub model: Option<String>,
    /// Total token usage, when the provider reports it.
    pub total_tokens: Option<u32>,
}

/// A single image-generation request.
///
/// The prompt is expected to be length-capped by the caller; providers
/// reject prompts over their published limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(setter(into, strip_option), default)]
pub struct ImageRequest {
    /// Model identifier to use.
    pub model: String,
    /// The rendering prompt.
    pub prompt: String,
    /// Requested dimensions, e.g. `1024x1024`.
    pub size: Option<String>,
    /// Requested quality tier, e.g. `standard`.
    pub quality: Option<String>,
}

/// A rendered image, normalized to raw bytes.
///
/// Providers answer with base64 payloads or short-lived URLs; clients
/// resolve either form to bytes before returning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedImage {
    /// Decoded image data.
    pub bytes: Vec<u8>,
    /// Format sniffed from the payload.
    pub format: ImageFormat,
    /// Model the provider reports having used.
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_leave_options_unset() {
        let request = TextRequestBuilder::default()
            .prompt("hello")
            .build()
            .unwrap();
        assert_eq!(request.prompt, "hello");
        assert!(request.system.is_none());
        assert!(request.temperature.is_none());
    }

    #[test]
    fn image_request_builder_strips_options() {
        let request = ImageRequestBuilder::default()
            .model("gpt-image-1")
            .prompt("a lighthouse on Europa")
            .size("1024x1024")
            .build()
            .unwrap();
        assert_eq!(request.size.as_deref(), Some("1024x1024"));
        assert!(request.quality.is_none());
    }
}
