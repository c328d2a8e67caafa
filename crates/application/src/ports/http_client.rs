//! HTTP client port

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use gorest_check_domain::{RequestSpec, ResponseSpec};

/// Boxed future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Port for executing HTTP requests.
///
/// Any status code the server returns is a successful exchange at this level;
/// only transport problems are errors. Status classification happens above.
pub trait HttpClient: Send + Sync {
    /// Sends `request` and returns the captured response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be sent or the response could
    /// not be read.
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_>;
}

/// Transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The per-request timeout elapsed.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// Host name resolution failed.
    #[error("could not resolve host {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying message.
        message: String,
    },

    /// The remote end refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection failure (TLS, reset, ...).
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}
