//! Execute request use case
//!
//! Sends one request through the [`HttpClient`] port and optionally splits the
//! result on status class.

use std::sync::Arc;

use gorest_check_domain::{ExchangeOutcome, RequestSpec, ResponseSpec};
use thiserror::Error;
use tracing::debug;

use crate::ports::{HttpClient, HttpClientError};

/// Result type for request execution.
pub type ExecuteResult = Result<ResponseSpec, ExecuteRequestError>;

/// Error type for the execute request use case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteRequestError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport failed.
    #[error("{0}")]
    HttpError(#[from] HttpClientError),
}

/// Use case for executing HTTP requests.
///
/// # Example
///
/// ```ignore
/// let use_case = ExecuteRequest::new(Arc::new(ReqwestHttpClient::new()?));
/// let request = RequestSpec::get("List users", "https://gorest.co.in/public/v2/users/");
/// match use_case.execute_classified(&request).await? {
///     Ok(response) => println!("{}", response.status),
///     Err(error) => println!("server said {}", error.status),
/// }
/// ```
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates the use case on top of `client`.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes the request and returns the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns `ExecuteRequestError` on validation or transport failures.
    pub async fn execute(&self, request: &RequestSpec) -> ExecuteResult {
        Self::validate(request)?;

        debug!(
            request_id = %request.id,
            method = %request.method,
            url = %request.url,
            "sending request"
        );
        let response = self.client.execute(request).await?;
        debug!(
            request_id = %request.id,
            status = response.status,
            duration_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
            "received response"
        );

        Ok(response)
    }

    /// Executes the request and classifies the response: 2xx is `Ok`, any
    /// other status is an `ErrorResponse` that still carries the response.
    ///
    /// # Errors
    ///
    /// The outer error is reserved for validation and transport failures.
    pub async fn execute_classified(
        &self,
        request: &RequestSpec,
    ) -> Result<ExchangeOutcome, ExecuteRequestError> {
        self.execute(request).await.map(ResponseSpec::classify)
    }

    fn validate(request: &RequestSpec) -> Result<(), ExecuteRequestError> {
        if request.url.trim().is_empty() {
            return Err(ExecuteRequestError::EmptyUrl);
        }

        if !request.url.starts_with("http://") && !request.url.starts_with("https://") {
            return Err(ExecuteRequestError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        request
            .parse_url()
            .map(|_| ())
            .map_err(|e| ExecuteRequestError::InvalidUrl(format!("{e}: {}", request.url)))
    }
}
