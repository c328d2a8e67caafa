//! Response assertions.

mod runner;

pub use runner::AssertionRunner;
