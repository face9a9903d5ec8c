//! Error types for the GitHub API client.
//!
//! This module contains error types used throughout the crate for
//! configuration and credential validation.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation.
//!
//! # Example
//!
//! ```rust
//! use github_api::{ApiHost, ConfigError};
//!
//! let result = ApiHost::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyHost)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Host name cannot be empty.
    #[error("API host cannot be empty. Please provide a host such as 'api.github.com'.")]
    EmptyHost,

    /// Host name is malformed.
    #[error("Invalid API host '{host}'. Expected a bare host name without scheme or path.")]
    InvalidHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// Scheme is not supported.
    #[error("Invalid scheme '{scheme}'. Expected 'http' or 'https'.")]
    InvalidScheme {
        /// The invalid scheme that was provided.
        scheme: String,
    },

    /// A URL could not be parsed into scheme, host and port.
    #[error("Invalid URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://github.com').")]
    InvalidUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API generation is not recognised.
    #[error("Invalid API generation '{generation}'. Expected 'v2' or 'v3'.")]
    InvalidApiGeneration {
        /// The invalid generation string that was provided.
        generation: String,
    },

    /// Username cannot be empty for basic authentication.
    #[error("Username cannot be empty for basic authentication.")]
    EmptyUsername,

    /// OAuth2 token cannot be empty.
    #[error("OAuth2 token cannot be empty.")]
    EmptyToken,
}
