//! Request builders for the user endpoints.

use gorest_check_domain::{
    DomainResult, Header, HttpMethod, NewUser, RequestBody, RequestSpec, UserId, UserUpdate,
};
use url::Url;

use crate::error::{ApplicationError, ApplicationResult};

/// Builds [`RequestSpec`]s for `<base>`, `<base>/{id}` with the bearer token
/// and JSON content type attached to every request.
#[derive(Debug, Clone)]
pub struct UsersApi {
    base_url: Url,
    token: String,
    timeout_ms: Option<u64>,
}

impl UsersApi {
    /// Creates a builder for the collection at `base_url`.
    ///
    /// A missing token is sent as an empty bearer credential; the service
    /// answers with an authentication error that the suite reports as an
    /// ordinary failure.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidConfig`] if `base_url` is not an
    /// absolute http(s) URL.
    pub fn new(base_url: &str, token: Option<&str>) -> ApplicationResult<Self> {
        let mut base_url = Url::parse(base_url.trim())
            .map_err(|e| ApplicationError::InvalidConfig(format!("base URL {base_url:?}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApplicationError::InvalidConfig(format!(
                "base URL must use http or https, got {}",
                base_url.scheme()
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            token: token.unwrap_or_default().to_string(),
            timeout_ms: None,
        })
    }

    /// Applies a timeout to every built request.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// The collection URL, always with a trailing slash.
    #[must_use]
    pub fn collection_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// URL of a single user.
    #[must_use]
    pub fn user_url(&self, id: UserId) -> String {
        format!("{}{id}", self.base_url)
    }

    /// `GET <base>`
    #[must_use]
    pub fn list(&self) -> RequestSpec {
        self.request("List users", HttpMethod::Get, self.collection_url().to_string())
    }

    /// `POST <base>` with the new user as JSON.
    ///
    /// # Errors
    ///
    /// Fails if the payload cannot be serialized.
    pub fn create(&self, user: &NewUser) -> DomainResult<RequestSpec> {
        Ok(self
            .request("Create user", HttpMethod::Post, self.collection_url().to_string())
            .with_body(RequestBody::json(user)?))
    }

    /// `GET <base>/{id}`
    #[must_use]
    pub fn get(&self, id: UserId) -> RequestSpec {
        self.request("Get user", HttpMethod::Get, self.user_url(id))
    }

    /// `PUT <base>/{id}` with the partial update as JSON.
    ///
    /// # Errors
    ///
    /// Fails if the payload cannot be serialized.
    pub fn update(&self, id: UserId, update: &UserUpdate) -> DomainResult<RequestSpec> {
        Ok(self
            .request("Update user", HttpMethod::Put, self.user_url(id))
            .with_body(RequestBody::json(update)?))
    }

    /// `DELETE <base>/{id}`
    #[must_use]
    pub fn delete(&self, id: UserId) -> RequestSpec {
        self.request("Delete user", HttpMethod::Delete, self.user_url(id))
    }

    fn request(&self, name: &str, method: HttpMethod, url: String) -> RequestSpec {
        RequestSpec::new(name, method, url)
            .with_header(Header::bearer(&self.token))
            .with_header(Header::json_content_type())
            .with_timeout_ms(self.timeout_ms)
    }
}
