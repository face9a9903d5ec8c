//! HTTP-specific error types for the GitHub API client.
//!
//! # Error Handling
//!
//! - [`HttpError`]: Unified error type for one transport call
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`ClassifiedError`]: An API rejection with a classified status
//!
//! # Example
//!
//! ```rust,ignore
//! use github_api::clients::{ErrorKind, HttpError};
//!
//! match client.get::<Repository>(&request).await {
//!     Ok(response) => println!("Fetched {:?}", response.body),
//!     Err(HttpError::Api(e)) if e.kind() == ErrorKind::FieldMissing => {
//!         println!("{}", e.message());
//!     }
//!     Err(HttpError::Status { status_line, .. }) => println!("Unexpected {status_line}"),
//!     Err(e) => println!("Failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::api_error::{ClassifiedError, ErrorKind};
use crate::codec::DecodeError;

/// Statuses whose error bodies are decoded and classified.
pub const CLASSIFIED_STATUSES: [u16; 6] = [400, 401, 403, 404, 422, 500];

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,

    /// The request path includes a scheme and host.
    #[error("Request path '{path}' must be relative to the API root.")]
    AbsolutePath {
        /// The rejected path.
        path: String,
    },

    /// The page number is below 1.
    #[error("Invalid page {page}. Pages are numbered from 1.")]
    InvalidPage {
        /// The rejected page number.
        page: u32,
    },

    /// The page size is below 1.
    #[error("Invalid page size {page_size}. Page size must be at least 1.")]
    InvalidPageSize {
        /// The rejected page size.
        page_size: u32,
    },

    /// A URI could not be resolved against the configured host.
    #[error("Invalid URI '{uri}'.")]
    InvalidUri {
        /// The rejected URI.
        uri: String,
    },
}

/// Unified error type for one transport call.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API rejected the request with a classified status.
    #[error(transparent)]
    Api(ClassifiedError),

    /// Any other unsuccessful status.
    #[error("Unexpected response: {status_line}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Status code and reason phrase, e.g. `409 Conflict`.
        status_line: String,
    },

    /// A delete returned a representation.
    #[error("Unexpected content in response to delete ({status}): {body}")]
    UnexpectedContent {
        /// The HTTP status code.
        status: u16,
        /// The returned body.
        body: String,
    },

    /// A request or response body could not be (de)serialized.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the error kind.
    ///
    /// Failures that carry no classified body report
    /// [`ErrorKind::Transport`] (connection and unclassified status) or
    /// [`ErrorKind::Unknown`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(error) => error.kind(),
            Self::Status { .. } | Self::Network(_) => ErrorKind::Transport,
            Self::UnexpectedContent { .. } | Self::Decode(_) | Self::InvalidRequest(_) => {
                ErrorKind::Unknown
            }
        }
    }

    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(error) => Some(error.status()),
            Self::Status { status, .. } | Self::UnexpectedContent { status, .. } => Some(*status),
            Self::Network(error) => error.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Returns the classified error, for API rejections.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ClassifiedError> for HttpError {
    fn from(error: ClassifiedError) -> Self {
        Self::Api(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::api_error::RequestError;

    #[test]
    fn test_api_error_is_transparent() {
        let error: HttpError = ClassifiedError::new(
            404,
            RequestError {
                message: Some("Not Found".to_string()),
                errors: Vec::new(),
            },
        )
        .into();
        assert_eq!(error.to_string(), "404: Not Found");
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert!(error.api_error().is_some());
    }

    #[test]
    fn test_status_error_carries_status_line() {
        let error = HttpError::Status {
            status: 409,
            status_line: "409 Conflict".to_string(),
        };
        assert_eq!(error.to_string(), "Unexpected response: 409 Conflict");
        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.status(), Some(409));
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let error: HttpError = DecodeError::EmptyBody.into();
        assert_eq!(error.to_string(), "Empty response body");
        assert_eq!(error.status(), None);
        assert_eq!(error.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_invalid_request_messages() {
        assert_eq!(
            InvalidHttpRequestError::InvalidPage { page: 0 }.to_string(),
            "Invalid page 0. Pages are numbered from 1."
        );
        let error: HttpError = InvalidHttpRequestError::EmptyPath.into();
        assert_eq!(error.to_string(), "Request path cannot be empty.");
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &InvalidHttpRequestError::EmptyPath;
        let _: &dyn std::error::Error = &HttpError::Status {
            status: 502,
            status_line: "502 Bad Gateway".to_string(),
        };
    }
}
