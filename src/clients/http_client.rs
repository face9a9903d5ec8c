//! HTTP client for GitHub API communication.
//!
//! This module provides the [`HttpClient`] type, which executes one
//! authenticated call per method and classifies the outcome.

use std::sync::{PoisonError, RwLock};

use reqwest::header::{ACCEPT, ACCEPT_CHARSET, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::Credentials;
use crate::clients::api_error::{ClassifiedError, RequestError};
use crate::clients::errors::{HttpError, InvalidHttpRequestError, CLASSIFIED_STATUSES};
use crate::clients::http_request::{is_absolute_uri, ApiRequest, HttpMethod, PagedRequest};
use crate::clients::http_response::{ApiResponse, HttpResponse, ResponseBody};
use crate::clients::pagination::PageIterator;
use crate::codec::JsonCodec;
use crate::config::ClientConfig;
use crate::error::ConfigError;

/// Content type of request and response bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Charset announced for request bodies.
pub const CHARSET_UTF8: &str = "utf-8";

/// HTTP client for making requests to the GitHub API.
///
/// The client handles:
/// - URI resolution against the configured host and path prefix
/// - User-Agent, Accept and Authorization headers
/// - JSON encoding of request bodies and decoding of responses
/// - Mapping of unsuccessful statuses to [`HttpError`]
///
/// Each call performs a single request/response round trip on its own
/// connection. There are no retries.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. Credentials may be changed between calls;
/// a call in flight keeps the credentials it captured when it was sent.
///
/// # Example
///
/// ```rust,ignore
/// use github_api::{ApiRequest, ClientConfig, HttpClient};
///
/// let client = HttpClient::new(ClientConfig::default())?;
/// client.set_oauth2_token("ghp_example")?;
///
/// let request = ApiRequest::builder("/user").build()?;
/// let response = client.get::<serde_json::Value>(&request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    config: ClientConfig,
    /// Scheme, host and port, e.g. `https://api.github.com`.
    base_uri: String,
    user_agent: String,
    codec: JsonCodec,
    credentials: RwLock<Credentials>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new anonymous client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            client,
            base_uri: config.base_uri(),
            user_agent: config.user_agent(),
            config,
            codec: JsonCodec::new(),
            credentials: RwLock::new(Credentials::Anonymous),
        })
    }

    /// Replaces the JSON codec used for request and response bodies.
    #[must_use]
    pub fn with_codec(mut self, codec: JsonCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the User-Agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the JSON codec.
    #[must_use]
    pub const fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    /// Switches to basic authentication.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the username is empty.
    pub fn set_credentials(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), ConfigError> {
        self.set_auth(Credentials::basic(username, password)?);
        Ok(())
    }

    /// Switches to OAuth2 token authentication.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty.
    pub fn set_oauth2_token(&self, token: impl Into<String>) -> Result<(), ConfigError> {
        self.set_auth(Credentials::oauth2_token(token)?);
        Ok(())
    }

    /// Replaces the active credentials.
    pub fn set_auth(&self, credentials: Credentials) {
        *self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = credentials;
    }

    /// Switches to anonymous access.
    pub fn clear_credentials(&self) {
        self.set_auth(Credentials::Anonymous);
    }

    /// Returns a snapshot of the active credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the login used for basic authentication, if any.
    #[must_use]
    pub fn user(&self) -> Option<String> {
        self.credentials().user().map(str::to_string)
    }

    /// Resolves a request URI to an absolute URL on the configured host.
    ///
    /// Relative URIs get the configured path prefix unless they already
    /// start with it. Absolute URIs, such as those from `Link` headers,
    /// keep their path and query but are retargeted to the configured
    /// scheme, host and port.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the URI is empty or cannot be
    /// parsed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use github_api::{ApiHost, ClientConfig, HttpClient};
    ///
    /// let config = ClientConfig::builder()
    ///     .host(ApiHost::new("ghe.example.com").unwrap())
    ///     .build();
    /// let client = HttpClient::new(config).unwrap();
    ///
    /// assert_eq!(
    ///     client.resolve_uri("/user/repos?page=2").unwrap(),
    ///     "https://ghe.example.com/api/v3/user/repos?page=2"
    /// );
    /// assert_eq!(
    ///     client.resolve_uri("https://other.example.com/api/v3/user/repos?page=3").unwrap(),
    ///     "https://ghe.example.com/api/v3/user/repos?page=3"
    /// );
    /// ```
    pub fn resolve_uri(&self, uri: &str) -> Result<String, InvalidHttpRequestError> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        let path_and_query = if is_absolute_uri(uri) {
            let parsed =
                reqwest::Url::parse(uri).map_err(|_| InvalidHttpRequestError::InvalidUri {
                    uri: uri.to_string(),
                })?;
            match parsed.query() {
                Some(query) => format!("{}?{query}", parsed.path()),
                None => parsed.path().to_string(),
            }
        } else if uri.starts_with('/') {
            uri.to_string()
        } else {
            format!("/{uri}")
        };

        let path_and_query = match self.config.path_prefix() {
            Some(prefix) if !path_and_query.starts_with(prefix) => {
                format!("{prefix}{path_and_query}")
            }
            _ => path_and_query,
        };

        Ok(format!("{}{path_and_query}", self.base_uri))
    }

    /// Sends a GET request.
    ///
    /// 200 and 201 decode the body into `T` (or drop it if the request does
    /// not expect a result); 204 yields [`ResponseBody::NoContent`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Api`] for 400, 401, 403, 404, 422 and 500,
    /// [`HttpError::Status`] for any other unsuccessful status,
    /// [`HttpError::Decode`] if the body cannot be decoded and
    /// [`HttpError::Network`] if the connection fails.
    pub async fn get<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<ApiResponse<T>, HttpError> {
        self.get_uri(&request.generate_uri(), request.expects_result())
            .await
    }

    pub(crate) async fn get_uri<T: DeserializeOwned>(
        &self,
        uri: &str,
        expects_result: bool,
    ) -> Result<ApiResponse<T>, HttpError> {
        let response = self.send(HttpMethod::Get, uri, None).await?;
        let body = self.decode_body(&response, expects_result)?;
        let links = response.links();

        Ok(ApiResponse {
            status: response.status,
            headers: response.headers,
            links,
            body,
        })
    }

    /// Sends a POST request with an optional JSON body and decodes the result.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get`]. Encoding failures are [`HttpError::Decode`].
    pub async fn post<B, T>(&self, uri: &str, body: Option<&B>) -> Result<ResponseBody<T>, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(HttpMethod::Post, uri, body, true).await
    }

    /// Sends a POST request, dropping any response body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::post`].
    pub async fn post_without_result<B>(
        &self,
        uri: &str,
        body: Option<&B>,
    ) -> Result<ResponseBody<()>, HttpError>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(HttpMethod::Post, uri, body, false).await
    }

    /// Sends a PUT request with an optional JSON body and decodes the result.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::post`].
    pub async fn put<B, T>(&self, uri: &str, body: Option<&B>) -> Result<ResponseBody<T>, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(HttpMethod::Put, uri, body, true).await
    }

    /// Sends a PUT request, dropping any response body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::post`].
    pub async fn put_without_result<B>(
        &self,
        uri: &str,
        body: Option<&B>,
    ) -> Result<ResponseBody<()>, HttpError>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(HttpMethod::Put, uri, body, false).await
    }

    /// Sends a DELETE request.
    ///
    /// Succeeds on 204, or on another 2xx status with an empty body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::UnexpectedContent`] if a 2xx response carries a
    /// body; otherwise as [`HttpClient::get`].
    pub async fn delete(&self, uri: &str) -> Result<(), HttpError> {
        let response = self.send(HttpMethod::Delete, uri, None).await?;
        if response.is_no_content() {
            return Ok(());
        }
        if (200..300).contains(&response.status) {
            if response.body.trim().is_empty() {
                return Ok(());
            }
            return Err(HttpError::UnexpectedContent {
                status: response.status,
                body: response.body,
            });
        }
        Err(self.create_error(&response))
    }

    /// Returns `true` if a GET of `uri` succeeds and `false` on 404.
    ///
    /// # Errors
    ///
    /// Any failure other than 404 is returned as-is.
    pub async fn check(&self, uri: &str) -> Result<bool, HttpError> {
        let response = self.send(HttpMethod::Get, uri, None).await?;
        if response.is_ok() || response.is_no_content() {
            return Ok(true);
        }
        if response.status == 404 {
            return Ok(false);
        }
        Err(self.create_error(&response))
    }

    /// Creates a lazy iterator over the pages of `request`.
    #[must_use]
    pub fn page_iterator<T: DeserializeOwned>(&self, request: PagedRequest) -> PageIterator<'_, T> {
        PageIterator::new(self, request)
    }

    /// Fetches every page of `request` and concatenates the items.
    ///
    /// # Errors
    ///
    /// Returns the original cause of the first failed page fetch.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        request: PagedRequest,
    ) -> Result<Vec<T>, HttpError> {
        self.page_iterator(request).collect_all().await
    }

    async fn send_json<B, T>(
        &self,
        method: HttpMethod,
        uri: &str,
        body: Option<&B>,
        expects_result: bool,
    ) -> Result<ResponseBody<T>, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = body.map(|b| self.codec.to_json(b)).transpose()?;
        let response = self.send(method, uri, payload).await?;
        self.decode_body(&response, expects_result)
    }

    fn decode_body<T: DeserializeOwned>(
        &self,
        response: &HttpResponse,
        expects_result: bool,
    ) -> Result<ResponseBody<T>, HttpError> {
        if response.is_ok() {
            if expects_result {
                return Ok(ResponseBody::Parsed(self.codec.from_json(&response.body)?));
            }
            return Ok(ResponseBody::Discarded);
        }
        if response.is_no_content() {
            return Ok(ResponseBody::NoContent);
        }
        Err(self.create_error(response))
    }

    async fn send(
        &self,
        method: HttpMethod,
        uri: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.resolve_uri(uri)?;
        let credentials = self.credentials();

        let mut req_builder = self
            .client
            .request(method.as_reqwest(), &url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, CONTENT_TYPE_JSON);
        if let Some(authorization) = credentials.authorization_header() {
            req_builder = req_builder.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = body {
            req_builder = req_builder
                .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
                .header(ACCEPT_CHARSET, CHARSET_UTF8)
                .body(body);
        }

        tracing::debug!("Sending {} {}", method, url);
        let res = req_builder.send().await?;

        let status = res.status();
        let headers = HttpResponse::from_reqwest_headers(res.headers());
        let body = res.text().await?;
        tracing::debug!("Received {} for {} {}", status.as_u16(), method, url);

        Ok(HttpResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            headers,
            body,
        ))
    }

    /// Maps an unsuccessful response to an error.
    fn create_error(&self, response: &HttpResponse) -> HttpError {
        if !CLASSIFIED_STATUSES.contains(&response.status) {
            tracing::warn!(
                "Unexpected response status {} from GitHub API",
                response.status_line()
            );
            return HttpError::Status {
                status: response.status,
                status_line: response.status_line(),
            };
        }

        let mut error = if response.body.trim().is_empty() {
            RequestError::default()
        } else {
            match self.codec.from_json::<RequestError>(&response.body) {
                Ok(error) => error,
                Err(e) => return e.into(),
            }
        };
        if error.message.is_none() {
            error.message = Some(response.reason.clone());
        }

        ClassifiedError::new(response.status, error).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiGeneration, ApiHost, Scheme};

    fn enterprise_client(generation: ApiGeneration) -> HttpClient {
        let config = ClientConfig::builder()
            .host(ApiHost::new("ghe.local").unwrap())
            .scheme(Scheme::Http)
            .port(8080)
            .api_generation(generation)
            .build();
        HttpClient::new(config).unwrap()
    }

    #[test]
    fn test_client_construction_with_default_config() {
        let client = HttpClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.base_uri(), "https://api.github.com");
        assert!(client.user_agent().starts_with("GitHubRust/"));
        assert!(!client.credentials().is_authenticated());
    }

    #[test]
    fn test_default_host_has_no_prefix() {
        let client = HttpClient::new(ClientConfig::default()).unwrap();
        assert_eq!(
            client.resolve_uri("/users/octocat").unwrap(),
            "https://api.github.com/users/octocat"
        );
        assert_eq!(
            client.resolve_uri("users/octocat").unwrap(),
            "https://api.github.com/users/octocat"
        );
    }

    #[test]
    fn test_enterprise_host_prefix_applied_once() {
        let client = enterprise_client(ApiGeneration::V3);
        assert_eq!(
            client.resolve_uri("/user").unwrap(),
            "http://ghe.local:8080/api/v3/user"
        );
        assert_eq!(
            client.resolve_uri("/api/v3/user").unwrap(),
            "http://ghe.local:8080/api/v3/user"
        );
    }

    #[test]
    fn test_legacy_generation_prefix() {
        let client = enterprise_client(ApiGeneration::V2);
        assert_eq!(
            client.resolve_uri("/repos/show/octocat").unwrap(),
            "http://ghe.local:8080/api/v2/json/repos/show/octocat"
        );
    }

    #[test]
    fn test_absolute_uri_is_retargeted() {
        let client = enterprise_client(ApiGeneration::V3);
        assert_eq!(
            client
                .resolve_uri("https://elsewhere.example.com/api/v3/repos?page=2&per_page=10")
                .unwrap(),
            "http://ghe.local:8080/api/v3/repos?page=2&per_page=10"
        );
    }

    #[test]
    fn test_url_valued_query_stays_relative() {
        let client = enterprise_client(ApiGeneration::V3);
        assert_eq!(
            client
                .resolve_uri("/repos/o/r/hooks?callback=https://example.com/x")
                .unwrap(),
            "http://ghe.local:8080/api/v3/repos/o/r/hooks?callback=https://example.com/x"
        );
    }

    #[test]
    fn test_resolve_rejects_empty_uri() {
        let client = HttpClient::new(ClientConfig::default()).unwrap();
        assert_eq!(
            client.resolve_uri(" "),
            Err(InvalidHttpRequestError::EmptyPath)
        );
    }

    #[test]
    fn test_switching_auth_modes_replaces_state() {
        let client = HttpClient::new(ClientConfig::default()).unwrap();
        client.set_credentials("octocat", "secret").unwrap();
        assert_eq!(client.user().as_deref(), Some("octocat"));

        client.set_oauth2_token("abc").unwrap();
        assert_eq!(client.user(), None);
        assert_eq!(
            client.credentials().authorization_header().as_deref(),
            Some("token abc")
        );

        client.clear_credentials();
        assert!(client.credentials().authorization_header().is_none());
    }

    #[test]
    fn test_invalid_credentials_leave_state_untouched() {
        let client = HttpClient::new(ClientConfig::default()).unwrap();
        client.set_oauth2_token("abc").unwrap();
        assert!(client.set_credentials("", "pw").is_err());
        assert_eq!(
            client.credentials(),
            Credentials::OAuth2Token("abc".to_string())
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
