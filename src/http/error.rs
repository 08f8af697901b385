//! Error types for HTTP client operations.
//!
//! Every failed call surfaces as an [`HttpError`]. The variants separate the
//! categories the client treats differently: a 401 wipes the session, an
//! application error only happens when a caller asks for the envelope data,
//! and everything else is reported and returned.

use serde_json::Value;
use thiserror::Error;

use crate::codec::CodecError;

/// Errors that can occur during HTTP client operations.
///
/// # Example
///
/// ```rust,no_run
/// use slgaming::http::HttpError;
///
/// fn handle_error(err: HttpError) {
///     match err {
///         HttpError::Unauthorized { message } => {
///             eprintln!("Signed out: {}", message);
///         },
///         HttpError::ServerError { status, message, .. } => {
///             eprintln!("Server returned {}: {}", status, message);
///         },
///         _ => eprintln!("Other error: {}", err),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request never produced a response: connection refused, DNS
    /// failure, TLS error or the per-request timeout.
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// An error raised inside one of the middleware stages.
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),

    /// The backend answered 401. The session has already been cleared when
    /// this is returned.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Message from the response envelope, or the generic fallback.
        message: String,
    },

    /// The backend answered with any other non-2xx status.
    #[error("Server error {status}: {message}")]
    ServerError {
        status: reqwest::StatusCode,
        /// Message from the response envelope, or the generic fallback.
        message: String,
        /// The decoded response body.
        body: Value,
    },

    /// A 2xx envelope carried a nonzero application code.
    #[error("Application error {code}: {message}")]
    Application { code: i64, message: String },

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Only `GET`, `POST`, `PUT` and `DELETE` are supported.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(reqwest::Method),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl HttpError {
    /// The HTTP status behind this error, when there was a response.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            HttpError::Unauthorized { .. } => Some(reqwest::StatusCode::UNAUTHORIZED),
            HttpError::ServerError { status, .. } => Some(*status),
            HttpError::RequestFailed(e) => e.status(),
            HttpError::MiddlewareError(reqwest_middleware::Error::Reqwest(e)) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, HttpError::Unauthorized { .. })
    }
}
