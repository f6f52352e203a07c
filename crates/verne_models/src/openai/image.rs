//! OpenAI image generation client.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose;
use reqwest::Client;
use tracing::{debug, instrument};

use super::conversion::to_image_request;
use super::dto::{GeneratedImage, ImageGenerationResponse};
use super::{DEFAULT_BASE_URL, OPENAI_API_KEY_VAR, build_http_client};
use verne_core::{ImageFormat, ImageRequest, RenderedImage};
use verne_error::{ProviderError, ProviderErrorKind, VerneResult};
use verne_interface::ImageModel;

/// OpenAI image generation client.
#[derive(Debug, Clone)]
pub struct OpenAiImageClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiImageClient {
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

    /// Resolves a generated image payload to raw bytes.
    ///
    /// Inline base64 data wins; a hosted URL is fetched as a fallback.
    async fn resolve_payload(&self, image: &GeneratedImage) -> VerneResult<Vec<u8>> {
        if let Some(b64) = image.b64_json() {
            return general_purpose::STANDARD.decode(b64).map_err(|e| {
                ProviderError::new(ProviderErrorKind::Payload(format!(
                    "Failed to decode image payload: {}",
                    e
                )))
                .into()
            });
        }

        if let Some(url) = image.url() {
            debug!(url = %url, "Downloading hosted image payload");
            let download = self.client.get(url).send().await.map_err(|e| {
                ProviderError::new(ProviderErrorKind::Http(format!(
                    "Image download failed: {}",
                    e
                )))
            })?;

            if !download.status().is_success() {
                let status = download.status().as_u16();
                let message = download.text().await.unwrap_or_default();
                return Err(
                    ProviderError::new(ProviderErrorKind::Api { status, message }).into(),
                );
            }

            let bytes = download.bytes().await.map_err(|e| {
                ProviderError::new(ProviderErrorKind::Http(format!(
                    "Failed to read downloaded image: {}",
                    e
                )))
            })?;
            return Ok(bytes.to_vec());
        }

        Err(ProviderError::new(ProviderErrorKind::Payload(
            "Image response missing both b64_json and url".to_string(),
        ))
        .into())
    }
}

#[async_trait]
impl ImageModel for OpenAiImageClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model))]
    async fn render_image(&self, req: &ImageRequest) -> VerneResult<RenderedImage> {
        let body = to_image_request(req, &self.model)?;

        let url = format!("{}/images/generations", self.base_url);
        debug!(url = %url, "Sending image generation request");

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

        let generation: ImageGenerationResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Payload(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        let first = generation.data().first().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::Payload(
                "Image response contained no data".to_string(),
            ))
        })?;

        if let Some(revised) = first.revised_prompt() {
            debug!(length = revised.len(), "Provider revised the prompt");
        }

        let bytes = self.resolve_payload(first).await?;
        let format = ImageFormat::detect(&bytes);

        debug!(bytes = bytes.len(), format = %format, "Received rendered image");

        Ok(RenderedImage {
            bytes,
            format,
            model: Some(body.model().clone()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
