//! Lazy, forward-only iteration over paged results.
//!
//! A [`PageIterator`] fetches one page per [`PageIterator::next_page`] call.
//! The first call uses the URI generated by its [`PagedRequest`]; later calls
//! follow the `next` relation of the previous response until none remains.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_api::clients::PagedRequest;
//!
//! let request = PagedRequest::builder("/user/repos").page_size(50).build()?;
//! let mut pages = client.page_iterator::<Repository>(request);
//!
//! while pages.has_next() {
//!     for repo in pages.next_page().await? {
//!         println!("{}", repo.name);
//!     }
//! }
//! ```
//!
//! A `PageIterator` is driven by one caller; it borrows the client and
//! needs `&mut self` to advance.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::clients::errors::HttpError;
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::PagedRequest;
use crate::clients::http_response::ResponseBody;
use crate::clients::page_links::{page_number, PageLinks};
use crate::codec::DecodeError;

/// Position of a [`PageIterator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// No page has been fetched yet.
    Unstarted,
    /// The last response named a next page.
    HasNext,
    /// The last response named no next page. Terminal.
    Exhausted,
}

/// Error returned when advancing a [`PageIterator`] fails.
#[derive(Debug, Error)]
pub enum PageError {
    /// [`PageIterator::next_page`] was called after the last page.
    #[error("No more pages")]
    Exhausted,

    /// Fetching or decoding a page failed.
    #[error("Failed to fetch page {page} from '{uri}': {source}")]
    Fetch {
        /// Number of the page that failed.
        page: u32,
        /// URI that was requested.
        uri: String,
        /// The underlying failure.
        #[source]
        source: HttpError,
    },
}

impl PageError {
    /// Returns the underlying failure.
    #[must_use]
    pub const fn cause(&self) -> Option<&HttpError> {
        match self {
            Self::Fetch { source, .. } => Some(source),
            Self::Exhausted => None,
        }
    }

    /// Consumes the error and returns the underlying failure.
    #[must_use]
    pub fn into_cause(self) -> Option<HttpError> {
        match self {
            Self::Fetch { source, .. } => Some(source),
            Self::Exhausted => None,
        }
    }
}

/// Cursor over the pages of a [`PagedRequest`].
///
/// A failed advance leaves the cursor untouched, so [`has_next`] reports
/// the same value before and after the failure and the next call retries
/// the same page.
///
/// [`has_next`]: PageIterator::has_next
#[derive(Debug)]
pub struct PageIterator<'a, T> {
    client: &'a HttpClient,
    request: PagedRequest,
    state: CursorState,
    links: PageLinks,
    next_uri: Option<String>,
    last_page: Option<u32>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> PageIterator<'a, T> {
    /// Creates an unstarted iterator.
    #[must_use]
    pub fn new(client: &'a HttpClient, request: PagedRequest) -> Self {
        Self {
            client,
            request,
            state: CursorState::Unstarted,
            links: PageLinks::default(),
            next_uri: None,
            last_page: None,
            _marker: PhantomData,
        }
    }

    /// Returns `true` until a response without a `next` relation is received.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        !matches!(self.state, CursorState::Exhausted)
    }

    /// Returns the cursor state.
    #[must_use]
    pub const fn state(&self) -> CursorState {
        self.state
    }

    /// Returns the relations parsed from the most recent response.
    #[must_use]
    pub const fn links(&self) -> &PageLinks {
        &self.links
    }

    /// Returns the request; its page is the one the next advance fetches.
    #[must_use]
    pub const fn request(&self) -> &PagedRequest {
        &self.request
    }

    /// Returns the number of the page the next advance fetches, if any.
    #[must_use]
    pub const fn next_page_number(&self) -> Option<u32> {
        if self.has_next() {
            Some(self.request.page())
        } else {
            None
        }
    }

    /// Returns the number of the last page, if the server reported one.
    #[must_use]
    pub const fn last_page_number(&self) -> Option<u32> {
        self.last_page
    }

    /// Fetches the next page.
    ///
    /// The body may be an array, an object holding the array under the
    /// request's resource key, or a single object (a page of one). A 204
    /// response is an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Exhausted`] after the last page and
    /// [`PageError::Fetch`] wrapping the cause if the call fails.
    pub async fn next_page(&mut self) -> Result<Vec<T>, PageError> {
        let uri = match (self.state, &self.next_uri) {
            (CursorState::Exhausted, _) => return Err(PageError::Exhausted),
            (CursorState::HasNext, Some(next)) => next.clone(),
            _ => self.request.generate_uri(),
        };
        let page = self.request.page();

        tracing::debug!("Fetching page {} from {}", page, uri);
        let fetched = match self.client.get_uri::<Value>(&uri, true).await {
            Ok(response) => self
                .page_items(response.body)
                .map(|items| (items, response.links))
                .map_err(HttpError::from),
            Err(e) => Err(e),
        };
        let (items, links) = fetched.map_err(|source| PageError::Fetch {
            page,
            uri,
            source,
        })?;

        self.advance(page, links);
        Ok(items)
    }

    /// Fetches every remaining page and concatenates the items in order.
    ///
    /// # Errors
    ///
    /// Returns the original cause of the first failed fetch, not a
    /// [`PageError`].
    pub async fn collect_all(mut self) -> Result<Vec<T>, HttpError> {
        let mut all = Vec::new();
        while self.has_next() {
            match self.next_page().await {
                Ok(items) => all.extend(items),
                Err(PageError::Fetch { source, .. }) => return Err(source),
                Err(PageError::Exhausted) => break,
            }
        }
        Ok(all)
    }

    fn advance(&mut self, page: u32, links: PageLinks) {
        self.next_uri.clone_from(&links.next);
        self.last_page = links.last.as_deref().and_then(page_number);

        match &links.next {
            Some(next) => {
                self.state = CursorState::HasNext;
                self.request
                    .set_page(page_number(next).unwrap_or_else(|| page.saturating_add(1)));
            }
            None => self.state = CursorState::Exhausted,
        }
        tracing::debug!("Page {} fetched, cursor now {:?}", page, self.state);

        self.links = links;
    }

    fn page_items(&self, body: ResponseBody<Value>) -> Result<Vec<T>, DecodeError> {
        let value = match body {
            ResponseBody::Parsed(value) => value,
            ResponseBody::NoContent | ResponseBody::Discarded => return Ok(Vec::new()),
        };

        let value = match (value, self.request.resource_key()) {
            (Value::Object(mut map), Some(key)) => map.remove(key).unwrap_or(Value::Null),
            (value, _) => value,
        };

        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(DecodeError::from))
                .collect(),
            Value::Null => Ok(Vec::new()),
            single => Ok(vec![serde_json::from_value(single)?]),
        }
    }
}
