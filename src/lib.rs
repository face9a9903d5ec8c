//! # GitHub API Rust Client
//!
//! A Rust client for the GitHub v3 REST API (and the legacy v2 JSON API on
//! enterprise deployments), providing type-safe configuration, credentials,
//! `Link`-header pagination and classified API errors.
//!
//! ## Overview
//!
//! This crate provides:
//! - Instance-based configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Anonymous, basic and OAuth2 token [`Credentials`]
//! - An async transport, [`HttpClient`], performing one round trip per call
//! - Request descriptions ([`ApiRequest`], [`PagedRequest`]) and a lazy
//!   page cursor ([`PageIterator`])
//! - Classified API errors ([`ClassifiedError`]) separate from transport
//!   failures ([`HttpError`])
//! - A date codec accepting every date representation the API emits
//! - Event payload dispatch ([`events`]) and webhook verification and
//!   decoding ([`webhooks`])
//!
//! ## Quick Start
//!
//! ```rust
//! use github_api::{ApiRequest, ClientConfig, HttpClient};
//!
//! let client = HttpClient::new(ClientConfig::default()).unwrap();
//! client.set_oauth2_token("ghp_example").unwrap();
//!
//! let request = ApiRequest::builder("/repos/rust-lang/rust")
//!     .build()
//!     .unwrap();
//! assert_eq!(request.generate_uri(), "/repos/rust-lang/rust");
//! // let response = client.get::<github_api::models::Repository>(&request).await?;
//! ```
//!
//! ## Enterprise Deployments
//!
//! ```rust
//! use github_api::ClientConfig;
//!
//! let config = ClientConfig::from_url("https://ghe.example.com").unwrap();
//! assert_eq!(config.path_prefix(), Some("/api/v3"));
//! ```
//!
//! ## Pagination
//!
//! ```rust,ignore
//! use github_api::{HttpClient, PagedRequest};
//!
//! let request = PagedRequest::builder("/orgs/rust-lang/repos")
//!     .param("type", "public")
//!     .page_size(50)
//!     .build()?;
//!
//! let mut pages = client.page_iterator::<serde_json::Value>(request);
//! while pages.has_next() {
//!     let page = pages.next_page().await?;
//!     println!("{} repositories", page.len());
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and request builders validate on construction
//! - **Thread-safe**: Clients are `Send + Sync`; credentials may change between calls
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **No hidden retries**: Each call is exactly one request

pub mod auth;
pub mod clients;
pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use auth::Credentials;
pub use config::{ApiGeneration, ApiHost, ClientConfig, ClientConfigBuilder, Scheme};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiRequest, ApiResponse, ClassifiedError, ErrorKind, HttpClient, HttpError,
    InvalidHttpRequestError, PageError, PageIterator, PageLinks, PagedRequest, RequestError,
    ResponseBody,
};

// Re-export codec types
pub use codec::{DateCodec, DecodeError, JsonCodec, DATE_CODEC};
