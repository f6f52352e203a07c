//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, HttpError, JsonError, ProviderError};
#[cfg(feature = "database")]
use crate::DatabaseError;

/// The foundation error enum, one variant per workspace error domain.
///
/// # Examples
///
/// ```
/// use verne_error::{VerneError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: VerneError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VerneErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Text/image provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Generation pipeline error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Verne error with kind discrimination.
///
/// # Examples
///
/// ```
/// use verne_error::{VerneError, VerneResult, ConfigError};
///
/// fn might_fail() -> VerneResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Verne Error: {}", _0)]
pub struct VerneError(Box<VerneErrorKind>);

impl VerneError {
    /// Create a new error from a kind.
    pub fn new(kind: VerneErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VerneErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to VerneErrorKind
impl<T> From<T> for VerneError
where
    T: Into<VerneErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Verne operations.
///
/// # Examples
///
/// ```
/// use verne_error::{VerneResult, HttpError};
///
/// fn fetch_data() -> VerneResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type VerneResult<T> = std::result::Result<T, VerneError>;
