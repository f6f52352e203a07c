//! OpenAI API integration.
//!
//! Text completion goes through the chat completions endpoint, image
//! rendering through the images endpoint. Both clients share the same
//! authentication and base URL conventions.

mod conversion;
mod dto;
mod image;
mod text;

pub use dto::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, ChatMessageBuilder, ChatRole, ChatUsage, ChoiceMessage, GeneratedImage,
    ImageGenerationRequest, ImageGenerationRequestBuilder, ImageGenerationResponse,
};
pub use image::OpenAiImageClient;
pub use text::OpenAiTextClient;

use std::time::Duration;

use reqwest::Client;
use verne_error::{ProviderError, ProviderErrorKind, VerneResult};

/// Environment variable holding the API key.
pub(crate) const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Default API base URL.
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Generation can take a while for long passages and large images.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the shared HTTP client with generation-friendly timeouts.
pub(crate) fn build_http_client() -> VerneResult<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(|e| {
            ProviderError::new(ProviderErrorKind::Http(format!(
                "Failed to build HTTP client: {}",
                e
            )))
            .into()
        })
}
