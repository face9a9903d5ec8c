//! Credentials and `Authorization` header rendering.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::ConfigError;

/// Scheme word used in the `Authorization` header for OAuth2 tokens.
pub const AUTH_TOKEN: &str = "token";

/// The authentication mode used for requests.
///
/// Switching modes replaces the whole value, so the state of the previous
/// mode never leaks into the next one.
///
/// # Security
///
/// The `Debug` implementation masks passwords and tokens.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    /// No `Authorization` header is sent.
    #[default]
    Anonymous,
    /// HTTP basic authentication.
    Basic {
        /// Login name.
        username: String,
        /// Password.
        password: String,
    },
    /// OAuth2 access token.
    OAuth2Token(String),
}

impl Credentials {
    /// Creates basic credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the username is empty.
    pub fn basic(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self::Basic {
            username,
            password: password.into(),
        })
    }

    /// Creates OAuth2 token credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty.
    pub fn oauth2_token(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self::OAuth2Token(token))
    }

    /// Returns the login the client authenticates as, for basic credentials.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        match self {
            Self::Basic { username, .. } => Some(username),
            Self::Anonymous | Self::OAuth2Token(_) => None,
        }
    }

    /// Returns `true` unless the credentials are anonymous.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    /// Renders the `Authorization` header value for these credentials.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        match self {
            Self::Anonymous => None,
            Self::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                Some(format!("Basic {encoded}"))
            }
            Self::OAuth2Token(token) => Some(format!("{AUTH_TOKEN} {token}")),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"*****")
                .finish(),
            Self::OAuth2Token(_) => f.write_str("OAuth2Token(*****)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header_is_base64_of_user_and_password() {
        let credentials = Credentials::basic("user", "pass").unwrap();
        assert_eq!(
            credentials.authorization_header(),
            Some("Basic dXNlcjpwYXNz".to_string())
        );
        assert_eq!(credentials.user(), Some("user"));
    }

    #[test]
    fn test_token_header_uses_token_scheme() {
        let credentials = Credentials::oauth2_token("abc").unwrap();
        assert_eq!(
            credentials.authorization_header(),
            Some("token abc".to_string())
        );
        assert_eq!(credentials.user(), None);
    }

    #[test]
    fn test_anonymous_sends_no_header() {
        let credentials = Credentials::default();
        assert!(!credentials.is_authenticated());
        assert!(credentials.authorization_header().is_none());
    }

    #[test]
    fn test_validation_rejects_empty_values() {
        assert!(matches!(
            Credentials::basic("", "pass"),
            Err(ConfigError::EmptyUsername)
        ));
        assert!(matches!(
            Credentials::oauth2_token(" "),
            Err(ConfigError::EmptyToken)
        ));
    }

    #[test]
    fn test_debug_masks_secrets() {
        let basic = Credentials::basic("octocat", "hunter2").unwrap();
        let debug = format!("{basic:?}");
        assert!(debug.contains("octocat"));
        assert!(!debug.contains("hunter2"));

        let token = Credentials::oauth2_token("secret-token").unwrap();
        assert_eq!(format!("{token:?}"), "OAuth2Token(*****)");
    }
}
