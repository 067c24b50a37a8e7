use crate::url::domain::extract_host;
use crate::{UrlError, UrlResult};
use url::{ParseError, Url};

/// Immutable per-crawl record of the starting URL
///
/// Holds the scope boundary (host) and the base used when resolving relative
/// links. Built once by [`parse_root`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootContext {
    url: Url,
    host: String,
    raw: String,
}

impl RootContext {
    /// The parsed root URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Root scheme (`http` or `https`)
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Lowercase root host, the crawl's scope boundary
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit or scheme-default port
    pub fn port(&self) -> Option<u16> {
        self.url.port_or_known_default()
    }

    /// Root path
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// The starting URL exactly as the caller passed it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Registry key of the root URL
    pub fn key(&self) -> String {
        canonicalize(&self.url)
    }
}

/// Parses the root URL of a crawl
///
/// The root must be a complete absolute URL: a scheme and a host are both
/// required, and only HTTP and HTTPS are accepted. This is the only URL check
/// that can fail a crawl; discovered links are classified, never rejected.
///
/// # Arguments
///
/// * `raw` - The starting URL as given by the caller
///
/// # Returns
///
/// * `Ok(RootContext)` - Parsed root
/// * `Err(UrlError)` - The root is malformed
///
/// # Examples
///
/// ```
/// use site_sitemap::url::parse_root;
///
/// let root = parse_root("http://Example.com:8080/docs").unwrap();
/// assert_eq!(root.host(), "example.com");
/// assert_eq!(root.port(), Some(8080));
/// assert!(parse_root("example.com/docs").is_err());
/// ```
pub fn parse_root(raw: &str) -> UrlResult<RootContext> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Malformed("url required".to_string()));
    }

    let url = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => {
            return Err(UrlError::MissingScheme(trimmed.to_string()))
        }
        Err(ParseError::EmptyHost) => {
            return Err(UrlError::MissingHost(trimmed.to_string()))
        }
        Err(e) => return Err(UrlError::Malformed(format!("{}: {}", trimmed, e))),
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let host = extract_host(&url).ok_or_else(|| UrlError::MissingHost(trimmed.to_string()))?;

    Ok(RootContext {
        url,
        host,
        raw: raw.to_string(),
    })
}

/// Resolves a relative reference against a base URL
///
/// Standard RFC 3986 resolution. Returns `None` if the reference cannot be
/// joined onto the base.
pub fn resolve(relative: &str, base: &Url) -> Option<Url> {
    base.join(relative.trim()).ok()
}

/// Produces the canonical registry key for a URL
///
/// # Canonicalization Rules
///
/// 1. Scheme and host lowercased, default port elided, empty path becomes `/`,
///    dot segments removed (all done by `url::Url` parsing)
/// 2. Fragment removed (`/page#a` and `/page#b` are the same page)
/// 3. Trailing slash kept (`/about` and `/about/` stay distinct)
/// 4. Query string kept verbatim
///
/// # Examples
///
/// ```
/// use site_sitemap::url::canonicalize;
/// use url::Url;
///
/// let url = Url::parse("HTTP://Example.COM:80/a/../b#frag").unwrap();
/// assert_eq!(canonicalize(&url), "http://example.com/b");
/// ```
pub fn canonicalize(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.into()
}
