//! The ordered user CRUD suite.
//!
//! Six steps run in a fixed order. The create step records the new user's id
//! in a [`SuiteContext`]; the steps that need that id are skipped when it is
//! missing instead of sending requests to a bogus URL.

mod config;
mod context;
mod fixtures;
mod runner;
mod step;

pub use config::{DEFAULT_BASE_URL, SuiteConfig};
pub use context::{CreatedUser, SuiteContext};
pub use fixtures::{MISSING_USER_ID, UserFixtures};
pub use runner::{SUITE_NAME, UserSuite};
pub use step::SuiteStep;
