//! Error-to-status translation at the HTTP boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use verne_error::{GenerationErrorKind, ProviderErrorKind, VerneError, VerneErrorKind};

/// JSON body served with every non-success response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub error: String,
}

/// A failure mapped to an HTTP status and a wire message.
///
/// Handlers return this for every error path; the conversion from
/// [`VerneError`] assigns the status from the error domain:
/// unsupported content kinds are the caller's fault (400), provider
/// failures are upstream faults (502) with the provider message kept
/// verbatim, and everything else is a server fault (500).
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// The mapped HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The wire message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<VerneError> for ApiError {
    fn from(err: VerneError) -> Self {
        match err.kind() {
            VerneErrorKind::Generation(inner) => {
                let status = match &inner.kind {
                    GenerationErrorKind::UnsupportedMode(_) => StatusCode::BAD_REQUEST,
                    GenerationErrorKind::EmptyCompletion => StatusCode::BAD_GATEWAY,
                    GenerationErrorKind::Builder(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                Self::new(status, inner.kind.to_string())
            }
            VerneErrorKind::Provider(inner) => {
                let status = match &inner.kind {
                    ProviderErrorKind::MissingApiKey(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_GATEWAY,
                };
                Self::new(status, inner.kind.to_string())
            }
            _ => Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        } else {
            tracing::debug!(status = %self.status, message = %self.message, "request rejected");
        }
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verne_error::{GenerationError, ProviderError};

    #[test]
    fn unsupported_kind_maps_to_bad_request() {
        let err: VerneError =
            GenerationError::new(GenerationErrorKind::UnsupportedMode("video".to_string())).into();
        let api = ApiError::from(err);
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert!(api.message().contains("video"));
    }

    #[test]
    fn provider_failures_map_to_bad_gateway_with_message() {
        let err: VerneError = ProviderError::new(ProviderErrorKind::Api {
            status: 429,
            message: "rate limited".to_string(),
        })
        .into();
        let api = ApiError::from(err);
        assert_eq!(api.status(), StatusCode::BAD_GATEWAY);
        assert!(api.message().contains("rate limited"));
    }

    #[test]
    fn missing_api_key_is_a_server_fault() {
        let err: VerneError =
            ProviderError::new(ProviderErrorKind::MissingApiKey("OPENAI_API_KEY".to_string()))
                .into();
        assert_eq!(ApiError::from(err).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn empty_completion_is_an_upstream_fault() {
        let err: VerneError = GenerationError::new(GenerationErrorKind::EmptyCompletion).into();
        assert_eq!(ApiError::from(err).status(), StatusCode::BAD_GATEWAY);
    }
}
