//! Run configuration.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. environment variables prefixed `GOREST_` (`GOREST_TOKEN`,
//!    `GOREST_BASE_URL`, `GOREST_EMAIL`, `GOREST_TIMEOUT_MS`)

use ::config::{Config, Environment, Map};
use gorest_check_application::suite::{DEFAULT_BASE_URL, SuiteConfig};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const ENV_PREFIX: &str = "GOREST";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// Values were read but are not usable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Raw settings as read from the sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Users collection URL
    pub base_url: String,
    /// Bearer token
    #[serde(default)]
    pub token: Option<String>,
    /// Pinned create email
    #[serde(default)]
    pub email: Option<String>,
    /// Per-request timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Settings {
    /// Checks the values that would otherwise only fail once requests go out.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Invalid(format!("base_url '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        if let Some(email) = &self.email
            && !email.contains('@')
        {
            return Err(ConfigError::Invalid(format!(
                "email '{email}' is not an address"
            )));
        }
        Ok(())
    }

    /// Converts into the suite's view of the configuration.
    #[must_use]
    pub fn into_suite_config(self) -> SuiteConfig {
        SuiteConfig {
            base_url: self.base_url,
            token: self.token,
            email: self.email,
            timeout_ms: self.timeout_ms,
        }
    }
}

/// Loads and validates configuration from the process environment.
///
/// # Errors
///
/// Returns an error if a value cannot be parsed or fails validation.
pub fn load() -> Result<SuiteConfig, ConfigError> {
    load_from(None)
}

/// Like [`load`], reading variables from `vars` instead of the process
/// environment when given.
///
/// # Errors
///
/// Returns an error if a value cannot be parsed or fails validation.
pub fn load_from(vars: Option<Map<String, String>>) -> Result<SuiteConfig, ConfigError> {
    let config = Config::builder()
        .set_default("base_url", DEFAULT_BASE_URL)?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .ignore_empty(true)
                .source(vars),
        )
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    settings.validate()?;

    Ok(settings.into_suite_config())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = load_from(vars(&[])).unwrap();
        assert_eq!(config, SuiteConfig::default());
        assert!(!config.has_token());
    }

    #[test]
    fn test_environment_overrides() {
        let config = load_from(vars(&[
            ("GOREST_TOKEN", "secret"),
            ("GOREST_BASE_URL", "http://localhost:8080/users"),
            ("GOREST_EMAIL", "pinned@example.com"),
            ("GOREST_TIMEOUT_MS", "2500"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            SuiteConfig::new("http://localhost:8080/users")
                .with_token("secret")
                .with_email("pinned@example.com")
                .with_timeout_ms(2500)
        );
    }

    #[test]
    fn test_token_is_kept_verbatim() {
        for token in ["0042", "1e3", "12345678901234567890123456789012", "true"] {
            let config = load_from(vars(&[("GOREST_TOKEN", token)])).unwrap();
            assert_eq!(config.token.as_deref(), Some(token));
        }
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let config = load_from(vars(&[("GOREST_TOKEN", ""), ("GOREST_TIMEOUT_MS", "")])).unwrap();
        assert_eq!(config.token, None);
        assert_eq!(config.timeout_ms, None);
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = load_from(vars(&[("GOREST_BASE_URL", "ftp://gorest.co.in/users")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let err = load_from(vars(&[("GOREST_BASE_URL", "gorest")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_timeout() {
        let err = load_from(vars(&[("GOREST_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));

        let err = load_from(vars(&[("GOREST_TIMEOUT_MS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_email() {
        let err = load_from(vars(&[("GOREST_EMAIL", "irfan")])).unwrap_err();
        assert!(err.to_string().contains("not an address"));
    }
}
