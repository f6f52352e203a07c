//! Generation pipeline errors.

/// Pipeline error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Requested content kind is outside the supported enumeration
    #[display("Unsupported content type: {}", _0)]
    UnsupportedMode(String),

    /// Text provider returned an empty completion
    #[display("Provider returned an empty completion")]
    EmptyCompletion,

    /// Builder error when assembling a request
    #[display("Builder error: {}", _0)]
    Builder(String),
}

/// Generation pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use verne_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::UnsupportedMode("video".to_string()));
/// assert!(format!("{}", err).contains("video"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at {}:{}", kind, file, line)]
pub struct GenerationError {
    /// The specific error kind
    pub kind: GenerationErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
