//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around host and scheme values
//! that validate their contents on construction.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Host name of the public GitHub API.
pub const DEFAULT_API_HOST: &str = "api.github.com";

/// Host name of the public GitHub web site.
pub const DEFAULT_WEB_HOST: &str = "github.com";

/// Host name of the public Gist web site.
pub const GIST_WEB_HOST: &str = "gist.github.com";

/// A validated API host name.
///
/// The host is a bare name (no scheme, port or path), stored lowercase.
///
/// # Example
///
/// ```rust
/// use github_api::ApiHost;
///
/// let host = ApiHost::new("GHE.Example.com").unwrap();
/// assert_eq!(host.as_ref(), "ghe.example.com");
/// assert!(!host.is_default());
/// assert!(ApiHost::default().is_default());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiHost(String);

impl ApiHost {
    /// Creates a new validated API host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyHost`] if the host is empty, or
    /// [`ConfigError::InvalidHost`] if it contains a scheme, path, port
    /// separator or whitespace.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        let host = host.into();
        let trimmed = host.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        let invalid = trimmed
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | ':' | '?' | '#' | '@'));
        if invalid {
            return Err(ConfigError::InvalidHost { host });
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// Returns `true` if this is the public GitHub API host.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_API_HOST
    }
}

impl Default for ApiHost {
    fn default() -> Self {
        Self(DEFAULT_API_HOST.to_string())
    }
}

impl AsRef<str> for ApiHost {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URL scheme used to reach the API host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Plain HTTP, for local or test deployments.
    Http,
    /// HTTPS.
    #[default]
    Https,
}

impl Scheme {
    /// Returns the scheme as used in URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Returns the port implied by this scheme.
    #[must_use]
    pub const fn default_port(&self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            _ => Err(ConfigError::InvalidScheme {
                scheme: s.to_string(),
            }),
        }
    }
}
