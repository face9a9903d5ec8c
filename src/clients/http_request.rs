//! Request descriptions.
//!
//! This module provides [`ApiRequest`] for one-shot calls and
//! [`PagedRequest`] for calls whose results are walked page by page. Both
//! are immutable once built and generate their URI deterministically.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// Query parameter carrying the 1-based page number.
pub const PARAM_PAGE: &str = "page";
/// Query parameter carrying the page size.
pub const PARAM_PER_PAGE: &str = "per_page";
/// Number of the first page.
pub const PAGE_FIRST: u32 = 1;
/// Default page size.
pub const PAGE_SIZE: u32 = 100;

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    pub(crate) const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A pending GET call: a relative path plus ordered query parameters.
///
/// # Example
///
/// ```rust
/// use github_api::clients::ApiRequest;
///
/// let request = ApiRequest::builder("/repos/octocat/hello/issues")
///     .param("state", "open")
///     .param("labels", "bug,ui")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     request.generate_uri(),
///     "/repos/octocat/hello/issues?state=open&labels=bug%2Cui"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    path: String,
    params: Vec<(String, String)>,
    expects_result: bool,
}

impl ApiRequest {
    /// Creates a new builder for a request to `path`.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(path)
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameters in insertion order.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Returns the value of a query parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `false` if the response body should be discarded.
    #[must_use]
    pub const fn expects_result(&self) -> bool {
        self.expects_result
    }

    /// Generates the request URI.
    ///
    /// A path that already contains a query string is returned unchanged;
    /// otherwise the parameters are appended, percent-encoded, in order.
    #[must_use]
    pub fn generate_uri(&self) -> String {
        render_uri(
            &self.path,
            self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }
}

fn render_uri<'a>(path: &str, params: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    if path.contains('?') {
        return path.to_string();
    }

    let query = params
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Returns `true` if `uri` names a scheme and host rather than a path.
///
/// Only the part before the query counts, so query values may hold URLs.
pub(crate) fn is_absolute_uri(uri: &str) -> bool {
    let uri = uri.trim_start();
    let before_query = uri.split_once('?').map_or(uri, |(path, _)| path);
    uri.starts_with("http://") || uri.starts_with("https://") || before_query.contains("://")
}

fn validate_path(path: &str) -> Result<(), InvalidHttpRequestError> {
    if path.trim().is_empty() {
        return Err(InvalidHttpRequestError::EmptyPath);
    }
    if is_absolute_uri(path) {
        return Err(InvalidHttpRequestError::AbsolutePath {
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Builder for [`ApiRequest`].
#[derive(Debug)]
pub struct ApiRequestBuilder {
    path: String,
    params: Vec<(String, String)>,
    expects_result: bool,
}

impl ApiRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
            expects_result: true,
        }
    }

    /// Adds a query parameter. Setting an existing key replaces its value
    /// and keeps its position.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        insert_param(&mut self.params, key.into(), value.to_string());
        self
    }

    /// Adds every parameter of `params`, in order.
    #[must_use]
    pub fn params<K, V, I>(mut self, params: I) -> Self
    where
        K: Into<String>,
        V: ToString,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in params {
            insert_param(&mut self.params, key.into(), value.to_string());
        }
        self
    }

    /// Marks the response body as not needed; it is read and dropped.
    #[must_use]
    pub const fn discard_result(mut self) -> Self {
        self.expects_result = false;
        self
    }

    /// Builds the [`ApiRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::EmptyPath`] or
    /// [`InvalidHttpRequestError::AbsolutePath`] if the path is not a
    /// relative resource path.
    pub fn build(self) -> Result<ApiRequest, InvalidHttpRequestError> {
        validate_path(&self.path)?;
        Ok(ApiRequest {
            path: self.path,
            params: self.params,
            expects_result: self.expects_result,
        })
    }
}

fn insert_param(params: &mut Vec<(String, String)>, key: String, value: String) {
    match params.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => params.push((key, value)),
    }
}

/// A GET call whose results span several pages.
///
/// `page` and `per_page` are added to the query unless the caller already
/// supplied them, or the path carries its own query string.
///
/// # Example
///
/// ```rust
/// use github_api::clients::PagedRequest;
///
/// let request = PagedRequest::builder("/user/repos")
///     .param("type", "owner")
///     .page_size(50)
///     .build()
///     .unwrap();
/// assert_eq!(request.generate_uri(), "/user/repos?type=owner&page=1&per_page=50");
///
/// let request = PagedRequest::builder("/user/repos")
///     .param("per_page", "10")
///     .build()
///     .unwrap();
/// assert_eq!(request.generate_uri(), "/user/repos?per_page=10&page=1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagedRequest {
    request: ApiRequest,
    page: u32,
    page_size: u32,
    resource_key: Option<String>,
}

impl PagedRequest {
    /// Creates a new builder for a paged request to `path`.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> PagedRequestBuilder {
        PagedRequestBuilder::new(path)
    }

    /// Returns the underlying request.
    #[must_use]
    pub const fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Returns the page number the next generated URI asks for.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the key under which a wrapped page body holds its items.
    #[must_use]
    pub fn resource_key(&self) -> Option<&str> {
        self.resource_key.as_deref()
    }

    pub(crate) fn set_page(&mut self, page: u32) {
        self.page = page.max(PAGE_FIRST);
    }

    /// Generates the request URI with pagination parameters.
    ///
    /// Pure: calling it repeatedly returns the same string.
    #[must_use]
    pub fn generate_uri(&self) -> String {
        let page = self.page.to_string();
        let page_size = self.page_size.to_string();

        let base = self
            .request
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()));
        let page_param = self
            .request
            .param(PARAM_PAGE)
            .is_none()
            .then_some((PARAM_PAGE, page.as_str()));
        let size_param = self
            .request
            .param(PARAM_PER_PAGE)
            .is_none()
            .then_some((PARAM_PER_PAGE, page_size.as_str()));

        render_uri(
            &self.request.path,
            base.chain(page_param).chain(size_param),
        )
    }
}

/// Builder for [`PagedRequest`].
///
/// # Defaults
///
/// - `page`: 1
/// - `page_size`: 100
/// - `resource_key`: none (the body is a bare array)
#[derive(Debug)]
pub struct PagedRequestBuilder {
    request: ApiRequestBuilder,
    page: u32,
    page_size: u32,
    resource_key: Option<String>,
}

impl PagedRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            request: ApiRequestBuilder::new(path),
            page: PAGE_FIRST,
            page_size: PAGE_SIZE,
            resource_key: None,
        }
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.request = self.request.param(key, value);
        self
    }

    /// Sets the first page to fetch.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the key holding the items when the page body is an object, as
    /// with search results wrapped in `{"items": [...]}`.
    #[must_use]
    pub fn resource_key(mut self, key: impl Into<String>) -> Self {
        self.resource_key = Some(key.into());
        self
    }

    /// Builds the [`PagedRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the path is invalid or the
    /// page number or page size is zero.
    pub fn build(self) -> Result<PagedRequest, InvalidHttpRequestError> {
        if self.page < PAGE_FIRST {
            return Err(InvalidHttpRequestError::InvalidPage { page: self.page });
        }
        if self.page_size == 0 {
            return Err(InvalidHttpRequestError::InvalidPageSize {
                page_size: self.page_size,
            });
        }

        Ok(PagedRequest {
            request: self.request.build()?,
            page: self.page,
            page_size: self.page_size,
            resource_key: self.resource_key,
        })
    }
}
