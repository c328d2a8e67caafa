//! gorest-check infrastructure: adapters and configuration.
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, and loads run configuration.

pub mod adapters;
pub mod config;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use config::{ConfigError, Settings, load};
