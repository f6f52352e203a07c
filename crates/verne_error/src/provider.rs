//! Generative provider errors.

/// Provider-specific error conditions.
///
/// Covers both the text-completion and image-generation endpoints. The
/// original provider message is preserved so callers can surface it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Transport-level failure before a response was received
    #[display("Request failed: {}", _0)]
    Http(String),

    /// Provider returned a non-success status
    #[display("Provider returned {}: {}", status, message)]
    Api {
        /// HTTP status code returned by the provider
        status: u16,
        /// Provider error body, verbatim where available
        message: String,
    },

    /// Response body did not match the expected shape
    #[display("Unexpected response payload: {}", _0)]
    Payload(String),

    /// Request body could not be assembled
    #[display("Failed to build request: {}", _0)]
    Builder(String),

    /// Required API key missing from the environment
    #[display("API key not set: {}", _0)]
    MissingApiKey(String),
}

/// Provider error with location tracking.
///
/// # Examples
///
/// ```
/// use verne_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::Api {
///     status: 429,
///     message: "rate limited".to_string(),
/// });
/// assert!(format!("{}", err).contains("429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at {}:{}", kind, file, line)]
pub struct ProviderError {
    /// The specific error kind
    pub kind: ProviderErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
