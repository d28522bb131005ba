//! Request error types

use thiserror::Error;

/// Errors that can occur while performing a request
#[derive(Debug, Error)]
pub enum Error {
    /// Response declared a content type this crate does not decode
    #[error("Unsupported response content type: {0}")]
    UnsupportedContentType(String),
    /// Response status was not a success (4xx/5xx)
    #[error("HTTP error ({status} {reason}) for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase, empty if the code has none
        reason: String,
        /// Effective URL of the response
        url: String,
    },
    /// Proxy URL could not be parsed or installed
    #[error("Proxy error: {0}")]
    Proxy(String),
    /// Caller-supplied header name or value is not representable
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    /// Transport-level failure (DNS, connection, timeout, body decode),
    /// passed through from the underlying client unchanged
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}
