//! Suite settings.

/// Collection endpoint of the public GoRest API.
pub const DEFAULT_BASE_URL: &str = "https://gorest.co.in/public/v2/users/";

/// Everything the suite needs to know about its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Users collection URL.
    pub base_url: String,
    /// Bearer token. `None` still runs the suite; authenticated calls fail.
    pub token: Option<String>,
    /// Pins the email used by the create step. `None` generates one per run.
    pub email: Option<String>,
    /// Per-request timeout. `None` keeps the transport default.
    pub timeout_ms: Option<u64>,
}

impl SuiteConfig {
    /// Config for `base_url` with no token and generated email.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            email: None,
            timeout_ms: None,
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Pins the create email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// True when a non-blank token is configured.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
