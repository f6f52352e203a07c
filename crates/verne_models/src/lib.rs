//! Generative provider integrations for Verne.
//!
//! Client implementations for the text and image providers behind the
//! generation pipeline. Each client wraps one provider endpoint and
//! normalizes requests and responses to the `verne_core` types, so the
//! pipeline never sees provider wire formats.
//!
//! # Example
//!
//! ```no_run
//! use verne_core::TextRequestBuilder;
//! use verne_interface::TextModel;
//! use verne_models::OpenAiTextClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiTextClient::new("gpt-4o-mini".to_string())?;
//! let request = TextRequestBuilder::default()
//!     .prompt("Describe a city beneath the ice.")
//!     .build()?;
//! let response = client.generate_text(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

mod openai;

pub use openai::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, ChatMessageBuilder, ChatRole, ChatUsage, ChoiceMessage, GeneratedImage,
    ImageGenerationRequest, ImageGenerationRequestBuilder, ImageGenerationResponse,
    OpenAiImageClient, OpenAiTextClient,
};
