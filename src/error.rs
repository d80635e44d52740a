//! Error types for tokenfetch
//!
//! Every fallible operation in the crate returns `Result<T, Error>`.
//! Token errors are raised before any network call; response errors are
//! raised after the transport returns a body. None of them are retried.

use std::fmt;
use thiserror::Error;

/// Shape of an error payload returned by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// `{"errors": ["..."]}`
    Errors,
    /// `{"code": ..., "message": "..."}`
    CodeMessage,
    /// A well-formed object without the requested collection key
    MissingCollection,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Errors => f.write_str("errors"),
            Self::CodeMessage => f.write_str("code_message"),
            Self::MissingCollection => f.write_str("missing_collection"),
        }
    }
}

/// The main error type for tokenfetch
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Token Errors
    // ============================================================================
    #[error("The access token is empty.")]
    TokenEmpty,

    #[error("The access token is invalid: expected 3 segments, found {segments}.")]
    TokenInvalidSegments { segments: usize },

    #[error("The access token payload could not be decoded: {message}")]
    TokenDecodeFailure { message: String },

    #[error("The access token expired at {expired_at}.")]
    TokenExpired { expired_at: i64 },

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("The API returned an empty response.")]
    EmptyResponse,

    #[error("The API response could not be decoded: {message}")]
    ResponseDecodeFailure { message: String },

    #[error("{message}")]
    ApiError {
        kind: ApiErrorKind,
        code: Option<String>,
        message: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a token decode error
    pub fn token_decode(message: impl Into<String>) -> Self {
        Self::TokenDecodeFailure {
            message: message.into(),
        }
    }

    /// Create a response decode error
    pub fn response_decode(message: impl Into<String>) -> Self {
        Self::ResponseDecodeFailure {
            message: message.into(),
        }
    }

    /// Create an API error from the first entry of an `errors` list
    pub fn api_errors(first: impl fmt::Display) -> Self {
        Self::ApiError {
            kind: ApiErrorKind::Errors,
            code: None,
            message: format!("The API responded with the following error: {first}."),
        }
    }

    /// Create an API error from a `code`/`message` payload
    pub fn api_code(code: impl Into<String>, message: impl fmt::Display) -> Self {
        let code = code.into();
        Self::ApiError {
            message: format!(
                "Request failed. The API responded with the code: {code} and message: {message}."
            ),
            kind: ApiErrorKind::CodeMessage,
            code: Some(code),
        }
    }

    /// Create an API error for a response lacking the collection key
    pub fn missing_collection(collection: &str) -> Self {
        Self::ApiError {
            kind: ApiErrorKind::MissingCollection,
            code: None,
            message: format!(
                "The API response did not contain the expected collection: {collection}."
            ),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for failures raised while validating the access token
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            Error::TokenEmpty
                | Error::TokenInvalidSegments { .. }
                | Error::TokenDecodeFailure { .. }
                | Error::TokenExpired { .. }
        )
    }

    /// True for failures raised after the transport returned a body
    pub fn is_response_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyResponse | Error::ResponseDecodeFailure { .. } | Error::ApiError { .. }
        )
    }
}

/// Result type alias for tokenfetch
pub type Result<T> = std::result::Result<T, Error>;
