//! Classification of an exchange into success or error response.

use thiserror::Error;

use super::ResponseSpec;

/// A completed exchange whose status was not 2xx.
///
/// The full response is kept so callers can still inspect headers and body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request failed with status {status}")]
pub struct ErrorResponse {
    /// Status code returned by the server.
    pub status: u16,
    /// The response as received.
    pub response: ResponseSpec,
}

/// Either a successful response or an error response carrying its status.
pub type ExchangeOutcome = Result<ResponseSpec, ErrorResponse>;

impl ResponseSpec {
    /// Splits the response on its status class: 2xx is `Ok`, everything else
    /// becomes an [`ErrorResponse`].
    ///
    /// # Errors
    ///
    /// Returns [`ErrorResponse`] for any non-2xx status.
    pub fn classify(self) -> ExchangeOutcome {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ErrorResponse {
                status: self.status,
                response: self,
            })
        }
    }
}
