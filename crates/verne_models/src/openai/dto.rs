//! OpenAI API data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// Chat message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatMessage {
    /// Message role
    role: ChatRole,
    /// Message content
    content: String,
}

impl ChatMessage {
    /// Creates a new builder for `ChatMessage`.
    pub fn builder() -> ChatMessageBuilder {
        ChatMessageBuilder::default()
    }
}

/// Chat completions request body.
#[derive(Debug, Clone, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Temperature for sampling
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    /// Creates a new builder for `ChatCompletionRequest`.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

/// Token usage statistics from a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ChatUsage {
    /// Tokens consumed by the prompt
    #[serde(default)]
    prompt_tokens: Option<u32>,
    /// Tokens generated in the completion
    #[serde(default)]
    completion_tokens: Option<u32>,
    /// Total tokens across prompt and completion
    #[serde(default)]
    total_tokens: Option<u32>,
}

/// Assistant message returned inside a completion choice.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct ChoiceMessage {
    /// Role the provider attributes the message to
    #[serde(default)]
    role: String,
    /// Completion text, absent for refusals and tool calls
    #[serde(default)]
    content: Option<String>,
}

/// A single completion choice.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct ChatChoice {
    /// The generated message
    message: ChoiceMessage,
    /// Why generation stopped, e.g. `stop` or `length`
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Chat completions response body.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    /// Generated choices, usually one
    choices: Vec<ChatChoice>,
    /// Model the provider reports having used
    #[serde(default)]
    model: Option<String>,
    /// Token usage statistics (if available)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    usage: Option<ChatUsage>,
}

/// Image generation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImageGenerationRequest {
    /// Model identifier
    model: String,
    /// Rendering prompt
    prompt: String,
    /// Number of images to generate
    #[builder(default = "1")]
    n: u8,
    /// Requested dimensions, e.g. `1024x1024`
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    /// Requested quality tier
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<String>,
    /// Requested payload encoding, e.g. `b64_json`
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<String>,
}

impl ImageGenerationRequest {
    /// Creates a new builder for `ImageGenerationRequest`.
    pub fn builder() -> ImageGenerationRequestBuilder {
        ImageGenerationRequestBuilder::default()
    }
}

/// A single generated image payload.
///
/// Providers answer with inline base64 data or a short-lived URL
/// depending on the model and requested format.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct GeneratedImage {
    /// Base64-encoded image bytes
    #[serde(default)]
    b64_json: Option<String>,
    /// Short-lived download URL
    #[serde(default)]
    url: Option<String>,
    /// Prompt after provider-side revision
    #[serde(default)]
    revised_prompt: Option<String>,
}

/// Image generation response body.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct ImageGenerationResponse {
    /// Generated images, usually one
    data: Vec<GeneratedImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_omits_unset_options() {
        let request = ChatCompletionRequest::builder()
            .model("gpt-4o-mini")
            .messages(vec![
                ChatMessage::builder()
                    .role(ChatRole::User)
                    .content("hello")
                    .build()
                    .unwrap(),
            ])
            .build()
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn chat_response_parses_a_realistic_payload() {
        let payload = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Once upon a tide."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 20, "completion_tokens": 5, "total_tokens": 25}
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(
            response.choices()[0].message().content().as_deref(),
            Some("Once upon a tide.")
        );
        assert_eq!(
            response.usage().as_ref().and_then(|u| *u.total_tokens()),
            Some(25)
        );
    }

    #[test]
    fn chat_response_tolerates_null_content() {
        let payload = r#"{
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(payload).unwrap();
        assert!(response.choices()[0].message().content().is_none());
        assert!(response.model().is_none());
    }

    #[test]
    fn image_response_parses_either_payload_form() {
        let inline: ImageGenerationResponse =
            serde_json::from_str(r#"{"data": [{"b64_json": "aGVsbG8="}]}"#).unwrap();
        assert!(inline.data()[0].b64_json().is_some());
        assert!(inline.data()[0].url().is_none());

        let hosted: ImageGenerationResponse =
            serde_json::from_str(r#"{"data": [{"url": "https://example.test/img.png"}]}"#).unwrap();
        assert!(hosted.data()[0].b64_json().is_none());
        assert!(hosted.data()[0].url().is_some());
    }
}
