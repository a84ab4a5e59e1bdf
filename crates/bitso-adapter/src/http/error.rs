/*
[INPUT]:  Error sources (transport, JSON parsing, API envelopes, input validation)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the Bitso adapter
#[derive(Error, Debug)]
pub enum BitsoError {
    /// Network, TLS or protocol failure reaching the server
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body is not valid JSON
    #[error("Unable to parse server response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Exchange returned an explicit error envelope
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Envelope carried neither `error` nor `payload`
    #[error("Server response does not contain payload")]
    MissingPayload,

    /// Caller arguments violate an endpoint's input contract
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Payload present but not in the shape the endpoint expects
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be signed
    #[error("Request signing failed: {0}")]
    Signing(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied deadline elapsed
    #[error("Request deadline of {millis}ms elapsed")]
    Timeout { millis: u64 },

    /// Caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,
}

impl BitsoError {
    /// Check if the error is worth retrying by the caller.
    ///
    /// The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            BitsoError::Transport(err) => !err.is_builder() && !err.is_decode(),
            BitsoError::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Check if the error was raised before anything was sent
    pub fn is_input_error(&self) -> bool {
        matches!(self, BitsoError::InvalidInput(_))
    }

    pub fn is_api_error(&self) -> bool {
        matches!(self, BitsoError::Api { .. })
    }

    /// Exchange-defined error code, if this is an API error
    pub fn api_code(&self) -> Option<i32> {
        match self {
            BitsoError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Shorthand for an input contract violation
    pub fn invalid_input(message: impl Into<String>) -> Self {
        BitsoError::InvalidInput(message.into())
    }
}

/// Result type alias for Bitso operations
pub type Result<T> = std::result::Result<T, BitsoError>;
