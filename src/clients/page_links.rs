//! Link-header pagination.
//!
//! Responses to paged requests carry the URIs of related pages in a `Link`
//! header:
//!
//! ```text
//! Link: <https://api.github.com/user/repos?page=3&per_page=100>; rel="next",
//!       <https://api.github.com/user/repos?page=50&per_page=100>; rel="last"
//! ```
//!
//! Older deployments send `X-Next` and `X-Last` headers instead.

/// Name of the primary pagination header.
pub const HEADER_LINK: &str = "link";
/// Fallback header carrying the next page URI.
pub const HEADER_NEXT: &str = "x-next";
/// Fallback header carrying the last page URI.
pub const HEADER_LAST: &str = "x-last";

const META_REL: &str = "rel";
const META_FIRST: &str = "first";
const META_PREV: &str = "prev";
const META_NEXT: &str = "next";
const META_LAST: &str = "last";

/// Relation URIs parsed from one response.
///
/// # Example
///
/// ```rust
/// use github_api::clients::PageLinks;
///
/// let links = PageLinks::parse(
///     r#"<https://api.x/repos?page=2>; rel="next", <https://api.x/repos?page=5>; rel="last""#,
/// );
/// assert_eq!(links.next.as_deref(), Some("https://api.x/repos?page=2"));
/// assert_eq!(links.last.as_deref(), Some("https://api.x/repos?page=5"));
/// assert!(links.first.is_none());
/// assert!(links.prev.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// URI of the first page.
    pub first: Option<String>,
    /// URI of the previous page.
    pub prev: Option<String>,
    /// URI of the next page; `None` on the last page.
    pub next: Option<String>,
    /// URI of the last page.
    pub last: Option<String>,
}

impl PageLinks {
    /// Parses a `Link` header value.
    ///
    /// Segments without a bracketed URI and a parameter are skipped, as are
    /// unrecognized relation names.
    #[must_use]
    pub fn parse(header_value: &str) -> Self {
        let mut links = Self::default();

        for link in header_value.split(',') {
            let mut segments = link.split(';');
            let Some(uri) = segments.next().map(str::trim) else {
                continue;
            };
            let Some(uri) = uri.strip_prefix('<').and_then(|u| u.strip_suffix('>')) else {
                continue;
            };

            for param in segments {
                let Some((key, value)) = param.trim().split_once('=') else {
                    continue;
                };
                if key.trim() != META_REL {
                    continue;
                }
                let rel = value.trim();
                let rel = rel
                    .strip_prefix('"')
                    .and_then(|r| r.strip_suffix('"'))
                    .unwrap_or(rel);
                links.set(rel, uri);
            }
        }

        links
    }

    /// Builds links from the raw pagination headers of a response.
    ///
    /// The `X-Next` and `X-Last` values are used only when the `Link` header
    /// is absent or empty.
    #[must_use]
    pub fn from_headers(link: Option<&str>, next: Option<&str>, last: Option<&str>) -> Self {
        match link.filter(|value| !value.trim().is_empty()) {
            Some(value) => Self::parse(value),
            None => Self {
                next: next.map(str::to_string),
                last: last.map(str::to_string),
                ..Self::default()
            },
        }
    }

    fn set(&mut self, rel: &str, uri: &str) {
        let slot = match rel {
            META_FIRST => &mut self.first,
            META_PREV => &mut self.prev,
            META_NEXT => &mut self.next,
            META_LAST => &mut self.last,
            _ => return,
        };
        *slot = Some(uri.to_string());
    }

    /// Returns `true` if no relation was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first.is_none() && self.prev.is_none() && self.next.is_none() && self.last.is_none()
    }
}

/// Extracts the `page` query parameter of a URI, if it is a positive number.
///
/// ```rust
/// use github_api::clients::page_number;
///
/// assert_eq!(page_number("https://api.x/repos?per_page=10&page=4"), Some(4));
/// assert_eq!(page_number("/repos"), None);
/// ```
#[must_use]
pub fn page_number(uri: &str) -> Option<u32> {
    let (_, query) = uri.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .filter(|page| *page > 0)
}
