use bytes::Bytes;
use reqwest::{header::HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::HttpValidationError;

/// Polar client error types
#[derive(Error, Debug)]
pub enum PolarError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("Required parameter \"{parameter}\" was missing when calling {operation}()")]
    MissingParameter {
        parameter: &'static str,
        operation: &'static str,
    },

    #[error("{0}")]
    Response(#[from] ResponseError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Request aborted by caller")]
    Aborted,
}

/// Result type for Polar operations
pub type PolarResult<T> = Result<T, PolarError>;

impl PolarError {
    /// Create a missing parameter error
    pub fn missing_param(parameter: &'static str, operation: &'static str) -> Self {
        Self::MissingParameter {
            parameter,
            operation,
        }
    }

    /// Create an authentication error
    pub fn auth_error(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// HTTP status of the server response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Response(err) => Some(err.status()),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }

    /// The server rejected the call with 403
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(StatusCode::FORBIDDEN)
    }

    /// The server answered 404
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Whether an outer retry layer may reasonably try the call again.
    ///
    /// The client itself never retries. Transport failures, 429 and 5xx are
    /// considered transient; everything detected before I/O is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(err) => err.is_connect() || err.is_timeout() || err.is_request(),
            Self::Response(err) => {
                err.status() == StatusCode::TOO_MANY_REQUESTS || err.status().is_server_error()
            }
            _ => false,
        }
    }
}

/// A non-success response, kept raw for the caller to interpret.
#[derive(Debug, Clone)]
pub struct ResponseError {
    operation: &'static str,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ResponseError {
    pub(crate) fn new(
        operation: &'static str,
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    ) -> Self {
        Self {
            operation,
            status,
            headers,
            body,
        }
    }

    /// Name of the operation that failed
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw response body, exactly as received
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Parse the body as JSON into a caller-chosen type
    pub fn json<T: DeserializeOwned>(&self) -> PolarResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Parse a `{ "detail": [...] }` validation body, usually sent with 422
    pub fn validation_errors(&self) -> PolarResult<HttpValidationError> {
        self.json()
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Response returned an error code: {} when calling {}()",
            self.status, self.operation
        )
    }
}

impl std::error::Error for ResponseError {}
