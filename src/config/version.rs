//! GitHub API generation definitions.
//!
//! This module provides the [`ApiGeneration`] enum used to select the path
//! prefix of enterprise deployments, where the legacy and current API
//! generations are served side by side under different prefixes.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// GitHub API generation.
///
/// The public API host (`api.github.com`) serves the current generation at
/// its root. Other hosts serve each generation under its own path prefix.
///
/// # Example
///
/// ```rust
/// use github_api::ApiGeneration;
///
/// let generation: ApiGeneration = "v3".parse().unwrap();
/// assert_eq!(generation, ApiGeneration::V3);
/// assert_eq!(generation.path_prefix(), "/api/v3");
/// assert_eq!(ApiGeneration::V2.to_string(), "v2");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiGeneration {
    /// Legacy v2 API, served under `/api/v2/json`.
    V2,
    /// Current v3 API, served under `/api/v3`.
    #[default]
    V3,
}

impl ApiGeneration {
    /// Returns the current API generation.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V3
    }

    /// Returns the path prefix used on non-default hosts.
    #[must_use]
    pub const fn path_prefix(&self) -> &'static str {
        match self {
            Self::V2 => "/api/v2/json",
            Self::V3 => "/api/v3",
        }
    }
}

impl fmt::Display for ApiGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
        })
    }
}

impl FromStr for ApiGeneration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v2" | "2" => Ok(Self::V2),
            "v3" | "3" => Ok(Self::V3),
            other => Err(ConfigError::InvalidApiGeneration {
                generation: other.to_string(),
            }),
        }
    }
}
