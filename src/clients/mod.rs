//! HTTP client types for GitHub API communication.
//!
//! This module provides the request/response pipeline: request
//! descriptions, the authenticated transport, `Link`-header pagination and
//! the classification of failed calls.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async transport; one round trip per call
//! - [`ApiRequest`]: A relative path plus ordered query parameters
//! - [`PagedRequest`]: An [`ApiRequest`] with page number and page size
//! - [`PageIterator`]: A lazy cursor over the pages of a [`PagedRequest`]
//! - [`PageLinks`]: The `first`/`prev`/`next`/`last` relations of a response
//! - [`ApiResponse`] and [`ResponseBody`]: A decoded successful response
//! - [`HttpError`]: Unified error type for one call
//! - [`ClassifiedError`]: An API rejection with a precomputed message
//!
//! # Example
//!
//! ```rust,ignore
//! use github_api::clients::{HttpClient, PagedRequest};
//! use github_api::ClientConfig;
//!
//! let client = HttpClient::new(ClientConfig::default())?;
//! client.set_oauth2_token("ghp_example")?;
//!
//! let request = PagedRequest::builder("/orgs/rust-lang/repos").build()?;
//! let repos: Vec<serde_json::Value> = client.get_all(request).await?;
//! ```
//!
//! # Status Handling
//!
//! - **200, 201**: Success; the body is decoded unless no result was requested
//! - **204**: Success with no content
//! - **400, 401, 403, 404, 422, 500**: [`HttpError::Api`] with the decoded error body
//! - **Anything else**: [`HttpError::Status`] with the raw status line
//!
//! There are no automatic retries.

mod api_error;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod page_links;
mod pagination;

pub use api_error::{
    format_errors, ClassifiedError, ErrorKind, FieldError, RequestError, CODE_ALREADY_EXISTS,
    CODE_INVALID, CODE_MISSING_FIELD,
};
pub use errors::{HttpError, InvalidHttpRequestError, CLASSIFIED_STATUSES};
pub use http_client::{HttpClient, CHARSET_UTF8, CONTENT_TYPE_JSON};
pub use http_request::{
    ApiRequest, ApiRequestBuilder, HttpMethod, PagedRequest, PagedRequestBuilder, PAGE_FIRST,
    PAGE_SIZE, PARAM_PAGE, PARAM_PER_PAGE,
};
pub use http_response::{ApiResponse, HttpResponse, ResponseBody};
pub use page_links::{page_number, PageLinks, HEADER_LAST, HEADER_LINK, HEADER_NEXT};
pub use pagination::{CursorState, PageError, PageIterator};
