//! Authentication types for the GitHub API client.
//!
//! Callers supply credentials explicitly; exactly one authentication mode is
//! active at a time.
//!
//! # Overview
//!
//! - [`Credentials`]: anonymous, basic (username/password) or OAuth2 token
//!
//! # Example
//!
//! ```rust
//! use github_api::Credentials;
//!
//! let basic = Credentials::basic("octocat", "secret").unwrap();
//! assert_eq!(
//!     basic.authorization_header().as_deref(),
//!     Some("Basic b2N0b2NhdDpzZWNyZXQ=")
//! );
//!
//! let token = Credentials::oauth2_token("abc123").unwrap();
//! assert_eq!(token.authorization_header().as_deref(), Some("token abc123"));
//!
//! assert_eq!(Credentials::Anonymous.authorization_header(), None);
//! ```

mod credentials;

pub use credentials::{Credentials, AUTH_TOKEN};
