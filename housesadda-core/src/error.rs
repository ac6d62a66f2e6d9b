/// Structured error types for housesadda-core.
///
/// Uses `thiserror` for composable errors. The CLI binary wraps these in
/// `anyhow`; the server maps them onto HTTP responses.
use thiserror::Error;

/// Main error type for housesadda-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration is missing or malformed
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// Token could not be encoded
    #[error("token encoding failed: {source}")]
    TokenEncode {
        #[from]
        source: jsonwebtoken::errors::Error,
    },

    /// Token signature/shape was valid but the token has expired
    #[error("token expired")]
    TokenExpired,

    /// Token failed signature or structural validation
    #[error("invalid token")]
    InvalidToken,

    /// Password hashing or verification failed
    #[error("password hash error: {reason}")]
    PasswordHash { reason: String },
}

/// Result type alias for housesadda-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
