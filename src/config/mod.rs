//! Configuration types for the GitHub API client.
//!
//! This module provides the types used to point a client at the public
//! GitHub API or at an on-premise deployment.
//!
//! # Overview
//!
//! - [`ClientConfig`]: Host, port, scheme, API generation and user agent
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ApiHost`]: A validated host name
//! - [`Scheme`]: HTTP or HTTPS
//! - [`ApiGeneration`]: Selects the path prefix used on non-default hosts
//!
//! # Example
//!
//! ```rust
//! use github_api::{ApiHost, ClientConfig, Scheme};
//!
//! // Public API
//! let config = ClientConfig::default();
//! assert_eq!(config.base_uri(), "https://api.github.com");
//! assert_eq!(config.path_prefix(), None);
//!
//! // Enterprise deployment
//! let config = ClientConfig::builder()
//!     .host(ApiHost::new("ghe.example.com").unwrap())
//!     .port(8443)
//!     .scheme(Scheme::Https)
//!     .build();
//! assert_eq!(config.base_uri(), "https://ghe.example.com:8443");
//! assert_eq!(config.path_prefix(), Some("/api/v3"));
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiHost, Scheme, DEFAULT_API_HOST, DEFAULT_WEB_HOST, GIST_WEB_HOST};
pub use version::ApiGeneration;

use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for a GitHub API client.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    host: ApiHost,
    port: Option<u16>,
    scheme: Scheme,
    api_generation: ApiGeneration,
    user_agent: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Creates a configuration from a GitHub web URL.
    ///
    /// `github.com` and `gist.github.com` resolve to the public API host.
    /// Any other host is treated as an enterprise deployment and used as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL cannot be parsed or has
    /// no host, and [`ConfigError::InvalidScheme`] for non-HTTP schemes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use github_api::ClientConfig;
    ///
    /// let config = ClientConfig::from_url("https://github.com/rust-lang/rust").unwrap();
    /// assert_eq!(config.base_uri(), "https://api.github.com");
    ///
    /// let config = ClientConfig::from_url("https://ghe.example.com").unwrap();
    /// assert_eq!(config.base_uri(), "https://ghe.example.com");
    /// assert_eq!(config.path_prefix(), Some("/api/v3"));
    /// ```
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let (scheme, host, port) = parse_url(url)?;
        let host = if matches!(host.as_str(), DEFAULT_WEB_HOST | GIST_WEB_HOST) {
            ApiHost::default()
        } else {
            ApiHost::new(host)?
        };

        Ok(ClientConfigBuilder::new()
            .host(host)
            .scheme(scheme)
            .port_opt(port)
            .build())
    }

    /// Creates a configuration from an API base URL such as
    /// `http://127.0.0.1:8080`, keeping its scheme, host and port verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL cannot be parsed or has
    /// no host, and [`ConfigError::InvalidScheme`] for non-HTTP schemes.
    pub fn from_base_url(url: &str) -> Result<Self, ConfigError> {
        let (scheme, host, port) = parse_url(url)?;
        Ok(ClientConfigBuilder::new()
            .host(ApiHost::new(host)?)
            .scheme(scheme)
            .port_opt(port)
            .build())
    }

    /// Returns the API host.
    #[must_use]
    pub const fn host(&self) -> &ApiHost {
        &self.host
    }

    /// Returns the explicit port, if configured.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the API generation.
    #[must_use]
    pub const fn api_generation(&self) -> ApiGeneration {
        self.api_generation
    }

    /// Returns the user agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("GitHubRust/{SDK_VERSION}"))
    }

    /// Returns the scheme, host and (non-default) port as a URI root.
    #[must_use]
    pub fn base_uri(&self) -> String {
        match self.port {
            Some(port) if port != self.scheme.default_port() => {
                format!("{}://{}:{port}", self.scheme, self.host)
            }
            _ => format!("{}://{}", self.scheme, self.host),
        }
    }

    /// Returns the path prefix applied to request paths.
    ///
    /// The public API host has no prefix; any other host uses the prefix of
    /// the configured [`ApiGeneration`].
    #[must_use]
    pub fn path_prefix(&self) -> Option<&'static str> {
        if self.host.is_default() {
            None
        } else {
            Some(self.api_generation.path_prefix())
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfigBuilder::new().build()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

fn parse_url(url: &str) -> Result<(Scheme, String, Option<u16>), ConfigError> {
    let parsed = reqwest::Url::parse(url.trim()).map_err(|_| ConfigError::InvalidUrl {
        url: url.to_string(),
    })?;
    let scheme: Scheme = parsed.scheme().parse()?;
    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ConfigError::InvalidUrl {
            url: url.to_string(),
        })?;
    Ok((scheme, host.to_string(), parsed.port()))
}

/// Builder for constructing [`ClientConfig`] instances.
///
/// # Defaults
///
/// - `host`: `api.github.com`
/// - `port`: implied by the scheme
/// - `scheme`: HTTPS
/// - `api_generation`: v3
/// - `user_agent`: `GitHubRust/<crate version>`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    host: Option<ApiHost>,
    port: Option<u16>,
    scheme: Option<Scheme>,
    api_generation: Option<ApiGeneration>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API host.
    #[must_use]
    pub fn host(mut self, host: ApiHost) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets an explicit port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    const fn port_opt(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    /// Sets the scheme.
    #[must_use]
    pub const fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Sets the API generation used to pick the path prefix.
    #[must_use]
    pub const fn api_generation(mut self, generation: ApiGeneration) -> Self {
        self.api_generation = Some(generation);
        self
    }

    /// Sets the user agent. An empty value keeps the default.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        let agent = agent.into();
        self.user_agent = if agent.trim().is_empty() {
            None
        } else {
            Some(agent)
        };
        self
    }

    /// Builds the [`ClientConfig`].
    #[must_use]
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            host: self.host.unwrap_or_default(),
            port: self.port,
            scheme: self.scheme.unwrap_or_default(),
            api_generation: self.api_generation.unwrap_or_default(),
            user_agent: self.user_agent,
        }
    }
}
