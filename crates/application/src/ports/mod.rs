//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Adapters in the infrastructure crate implement them.

mod clock;
mod http_client;

pub use clock::Clock;
pub use http_client::{HttpClient, HttpClientError, HttpFuture};
