//! Type conversions between Verne and OpenAI wire types.

use verne_core::{ImageRequest, TextRequest, TextResponse};
use verne_error::{ProviderError, ProviderErrorKind, VerneResult};

use super::dto::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole, ImageGenerationRequest,
};

/// Converts a Verne text request to a chat completions body.
///
/// The request's model wins when set; `default_model` fills in when the
/// caller left it empty.
pub(super) fn to_chat_request(
    request: &TextRequest,
    default_model: &str,
) -> VerneResult<ChatCompletionRequest> {
    let model = if request.model.is_empty() {
        default_model
    } else {
        &request.model
    };

    let mut messages = Vec::new();
    if let Some(system) = &request.system {
        let message = ChatMessage::builder()
            .role(ChatRole::System)
            .content(system.clone())
            .build()
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Builder(format!(
                    "Failed to build system message: {}",
                    e
                )))
            })?;
        messages.push(message);
    }
    let message = ChatMessage::builder()
        .role(ChatRole::User)
        .content(request.prompt.clone())
        .build()
        .map_err(|e| {
            ProviderError::new(ProviderErrorKind::Builder(format!(
                "Failed to build user message: {}",
                e
            )))
        })?;
    messages.push(message);

    let mut builder = ChatCompletionRequest::builder();
    builder.model(model).messages(messages);

    if let Some(temperature) = request.temperature {
        builder.temperature(temperature);
    }
    if let Some(max_tokens) = request.max_tokens {
        builder.max_tokens(max_tokens);
    }

    builder.build().map_err(|e| {
        ProviderError::new(ProviderErrorKind::Builder(format!(
            "Failed to build chat request: {}",
            e
        )))
        .into()
    })
}

/// Converts a chat completions response to a Verne text response.
pub(super) fn from_chat_response(response: &ChatCompletionResponse) -> VerneResult<TextResponse> {
    let choice = response.choices().first().ok_or_else(|| {
        ProviderError::new(ProviderErrorKind::Payload(
            "Response contained no choices".to_string(),
        ))
    })?;

    Ok(TextResponse {
        text: choice.message().content().clone().unwrap_or_default(),
        model: response.model().clone(),
        total_tokens: response.usage().as_ref().and_then(|u| *u.total_tokens()),
    })
}

/// Converts a Verne image request to an images endpoint body.
///
/// Always asks for inline base64 payloads so responses resolve to bytes
/// without a second round trip.
pub(super) fn to_image_request(
    request: &ImageRequest,
    default_model: &str,
) -> VerneResult<ImageGenerationRequest> {
    let model = if request.model.is_empty() {
        default_model
    } else {
        &request.model
    };

    let mut builder = ImageGenerationRequest::builder();
    builder
        .model(model)
        .prompt(request.prompt.clone())
        .response_format("b64_json".to_string());

    if let Some(size) = &request.size {
        builder.size(size.clone());
    }
    if let Some(quality) = &request.quality {
        builder.quality(quality.clone());
    }

    builder.build().map_err(|e| {
        ProviderError::new(ProviderErrorKind::Builder(format!(
            "Failed to build image request: {}",
            e
        )))
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use verne_core::{ImageRequestBuilder, TextRequestBuilder};

    #[test]
    fn chat_request_carries_system_and_user_messages() {
        let request = TextRequestBuilder::default()
            .system("You are a fiction writer.")
            .prompt("Write a story.")
            .temperature(0.9_f32)
            .build()
            .unwrap();

        let body = to_chat_request(&request, "gpt-4o-mini").unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Write a story.");
    }

    #[test]
    fn request_model_overrides_the_default() {
        let request = TextRequestBuilder::default()
            .model("gpt-4.1")
            .prompt("Write a story.")
            .build()
            .unwrap();

        let body = to_chat_request(&request, "gpt-4o-mini").unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4.1");
    }

    #[test]
    fn empty_choices_is_a_payload_error() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let result = from_chat_response(&response);
        assert!(result.is_err());
    }

    #[test]
    fn image_request_asks_for_inline_payloads() {
        let request = ImageRequestBuilder::default()
            .prompt("a lighthouse on Europa")
            .size("1024x1024")
            .build()
            .unwrap();

        let body = to_image_request(&request, "gpt-image-1").unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"], "b64_json");
        assert_eq!(json["n"], 1);
        assert_eq!(json["size"], "1024x1024");
        assert!(json.get("quality").is_none());
    }
}
