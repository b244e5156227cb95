//! Error types for edge-demos workers

use thiserror::Error;

/// Errors raised by a binding (key-value, bucket, container)
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Service not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors that can occur in a handler
///
/// Workers do not recover from store failures; the error is returned to the
/// gateway, which answers with its default error response.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl HandlerError {
    /// Convert to a Response. Error details stay in the logs.
    pub fn into_response(self) -> crate::Response {
        crate::Response::internal_error()
    }
}

impl From<HandlerError> for crate::Response {
    fn from(err: HandlerError) -> Self {
        err.into_response()
    }
}
