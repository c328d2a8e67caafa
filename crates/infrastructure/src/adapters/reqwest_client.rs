//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication for the suite.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use gorest_check_application::ports::{HttpClient, HttpClientError, HttpFuture};
use gorest_check_domain::{HttpMethod, RequestBody, RequestSpec, ResponseSpec};
use reqwest::{Client, Method, Url};
use tracing::debug;

const USER_AGENT: &str = concat!("gorest-check/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpClient` port from the
/// application layer. The inner client pools connections, so one instance
/// should serve the whole run.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - No overall timeout unless the request carries one
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled (rustls)
    /// - User-Agent: `gorest-check/<version>`
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Attaches the encoded body, if any.
    fn build_body(builder: reqwest::RequestBuilder, body: &RequestBody) -> reqwest::RequestBuilder {
        match body.to_bytes() {
            Some(bytes) => builder.body(bytes),
            None => builder,
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: Option<u64>) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout {
                timeout_ms: timeout_ms.unwrap_or_default(),
            };
        }

        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::Other(format!("more than {MAX_REDIRECTS} redirects"));
        }

        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
        let method = request.method;
        let url = request.url.clone();
        let headers: Vec<_> = request.headers.iter().cloned().collect();
        let body = request.body.clone();
        let timeout_ms = request.timeout_ms;

        Box::pin(async move {
            let parsed_url =
                Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

            let start = Instant::now();

            let mut builder = self.client.request(Self::to_reqwest_method(method), parsed_url);
            if let Some(ms) = timeout_ms {
                builder = builder.timeout(Duration::from_millis(ms));
            }

            for header in &headers {
                builder = builder.header(&header.name, &header.value);
            }

            // Content-Type from the body unless the caller set one
            if let Some(content_type) = body.content_type() {
                let has_content_type = headers
                    .iter()
                    .any(|h| h.name.eq_ignore_ascii_case("content-type"));
                if !has_content_type {
                    builder = builder.header("Content-Type", content_type);
                }
            }

            builder = Self::build_body(builder, &body);

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let duration = start.elapsed();
            let status = response.status().as_u16();

            let response_headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
                .to_vec();

            debug!(
                %method,
                %url,
                status,
                bytes = body_bytes.len(),
                duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                "received response"
            );

            Ok(ResponseSpec::new(
                status,
                response_headers,
                body_bytes,
                duration,
            ))
        })
    }
}
