//! gorest-check domain - core types
//!
//! Requests, responses, the remote user resource and the step/report model
//! used by the suite. Everything here is pure Rust with no I/O.

pub mod error;
pub mod request;
pub mod response;
pub mod testing;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use request::{Header, Headers, HttpMethod, RequestBody, RequestSpec};
pub use response::{ErrorResponse, ExchangeOutcome, ResponseSpec, StatusCode};
pub use testing::{Assertion, AssertionResult, StepOutcome, StepReport, SuiteReport};
pub use user::{Gender, NewUser, UserId, UserStatus, UserUpdate};
