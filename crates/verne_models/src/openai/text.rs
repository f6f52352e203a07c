//! OpenAI chat completion client.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use super::conversion::{from_chat_response, to_chat_request};
use super::dto::ChatCompletionResponse;
use super::{DEFAULT_BASE_URL, OPENAI_API_KEY_VAR, build_http_client};
use verne_core::{TextRequest, TextResponse};
use verne_error::{ProviderError, ProviderErrorKind, VerneResult};
use verne_interface::TextModel;

/// OpenAI chat completion client.
#[derive(Debug, Clone)]
pub struct OpenAiTextClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiTextClient {
    /// Creates a new client.
    ///
    /// Reads the API key from the `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is not set in the environment
    /// - The HTTP client cannot be initialized
    #[instrument(skip_all, fields(model = %model))]
    pub fn new(model: String) -> VerneResult<Self> {
        let api_key = std::env::var(OPENAI_API_KEY_VAR).map_err(|_| {
            ProviderError::new(ProviderErrorKind::MissingApiKey(
                OPENAI_API_KEY_VAR.to_string(),
            ))
        })?;

        Self::with_api_key(api_key, model)
    }

    /// Creates a new client with a specific API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip(api_key), fields(model = %model))]
    pub fn with_api_key(api_key: String, model: String) -> VerneResult<Self> {
        let client = build_http_client()?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Overrides the API base URL.
    ///
    /// Useful for proxies and compatible servers.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TextModel for OpenAiTextClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model))]
    async fn generate_text(&self, req: &TextRequest) -> VerneResult<TextResponse> {
        let body = to_chat_request(req, &self.model)?;

        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(ProviderErrorKind::Api { status, message }).into());
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Payload(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(
            choices = completion.choices().len(),
            "Received chat completion"
        );

        from_chat_response(&completion)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
