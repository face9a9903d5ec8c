//! HTTP response types for the GitHub API client.
//!
//! [`HttpResponse`] is the raw outcome of one round trip; [`ApiResponse`]
//! is what callers receive once the body has been decoded.

use std::collections::HashMap;

use crate::clients::page_links::{PageLinks, HEADER_LAST, HEADER_LINK, HEADER_NEXT};

/// A raw response: status, headers and body text.
///
/// Header names are stored lowercase; a header may have several values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The reason phrase, e.g. `Not Found`.
    pub reason: String,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The response body, as received.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, normalizing header names to lowercase.
    #[must_use]
    pub fn new(
        status: u16,
        reason: impl Into<String>,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .fold(HashMap::new(), |mut acc: HashMap<String, Vec<String>>, (k, v)| {
                acc.entry(k.to_lowercase()).or_default().extend(v);
                acc
            });
        Self {
            status,
            reason: reason.into(),
            headers,
            body: body.into(),
        }
    }

    pub(crate) fn from_reqwest_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the status line, e.g. `409 Conflict`.
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }

    /// Returns `true` for 200 and 201.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    /// Returns `true` for 204.
    #[must_use]
    pub const fn is_no_content(&self) -> bool {
        self.status == 204
    }

    /// Parses the pagination headers.
    #[must_use]
    pub fn links(&self) -> PageLinks {
        PageLinks::from_headers(
            self.header(HEADER_LINK),
            self.header(HEADER_NEXT),
            self.header(HEADER_LAST),
        )
    }
}

/// The body of a successful response.
///
/// "Nothing came back" ([`ResponseBody::NoContent`]) is distinct from
/// "nothing was asked for" ([`ResponseBody::Discarded`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseBody<T> {
    /// The body was decoded.
    Parsed(T),
    /// The server answered 204 No Content.
    NoContent,
    /// The caller did not request a result; the body was dropped.
    Discarded,
}

impl<T> ResponseBody<T> {
    /// Returns the decoded value, if any.
    #[must_use]
    pub fn into_parsed(self) -> Option<T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::NoContent | Self::Discarded => None,
        }
    }

    /// Returns a reference to the decoded value, if any.
    #[must_use]
    pub const fn parsed(&self) -> Option<&T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::NoContent | Self::Discarded => None,
        }
    }

    /// Returns `true` for a 204 response.
    #[must_use]
    pub const fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }
}

/// A successful, decoded response.
#[derive(Clone, Debug)]
pub struct ApiResponse<T> {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, lowercase names.
    pub headers: HashMap<String, Vec<String>>,
    /// Pagination relations of this response.
    pub links: PageLinks,
    /// The body.
    pub body: ResponseBody<T>,
}

impl<T> ApiResponse<T> {
    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
