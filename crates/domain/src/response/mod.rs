//! HTTP response domain types

mod outcome;
mod spec;

pub use outcome::{ErrorResponse, ExchangeOutcome};
pub use spec::{ResponseSpec, StatusCode};
