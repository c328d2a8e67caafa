//! gorest-check application - use cases and ports
//!
//! This crate defines:
//! - Port traits for the HTTP transport and the clock
//! - The request execution use case and outcome classification
//! - Request builders for the user endpoints
//! - The assertion runner and the ordered user suite

pub mod error;
pub mod execute_request;
pub mod ports;
pub mod suite;
pub mod testing;
pub mod users_api;

pub use error::{ApplicationError, ApplicationResult};
pub use execute_request::{ExecuteRequest, ExecuteRequestError, ExecuteResult};
pub use ports::{Clock, HttpClient, HttpClientError};
pub use suite::{CreatedUser, SuiteConfig, SuiteContext, SuiteStep, UserFixtures, UserSuite};
pub use testing::AssertionRunner;
pub use users_api::UsersApi;
