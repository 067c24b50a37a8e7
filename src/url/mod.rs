//! URL handling module for Site-Sitemap
//!
//! This module parses the root URL, classifies discovered links against the
//! root's host, resolves relative references and produces the canonical string
//! used as a registry key.

mod domain;
mod normalize;

use ::url::Url;

// Re-export main functions
pub use domain::extract_host;
pub use normalize::{canonicalize, parse_root, resolve, RootContext};

/// Where a discovered link points relative to the crawl root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkScope {
    /// Absolute http(s) URL on the root's host - followed
    SameHost(Url),
    /// Bare path, query or fragment with neither scheme nor host - resolved, then followed
    Relative(String),
    /// Another host, a non-web scheme, or nothing usable - dropped
    External,
}

/// Classifies a raw link string against the root context
///
/// # Classification Rules
///
/// 1. Empty (after trimming) → `External`
/// 2. Parses as an absolute URL:
///    - http(s) scheme and host equal to the root host → `SameHost`
///    - anything else (`mailto:`, `javascript:`, other hosts) → `External`
/// 3. Protocol-relative (`//host/path`) → resolved against the root scheme,
///    then classified by host like rule 2
/// 4. No scheme and no host → `Relative`
///
/// Host comparison ignores the port, matching the hostname-only scope of the
/// crawl.
///
/// # Examples
///
/// ```
/// use site_sitemap::url::{classify, parse_root, LinkScope};
///
/// let root = parse_root("http://example.com/").unwrap();
/// assert!(matches!(classify("http://example.com/about", &root), LinkScope::SameHost(_)));
/// assert_eq!(classify("/about", &root), LinkScope::Relative("/about".to_string()));
/// assert_eq!(classify("http://other.com/x", &root), LinkScope::External);
/// ```
pub fn classify(link: &str, root: &RootContext) -> LinkScope {
    let link = link.trim();
    if link.is_empty() {
        return LinkScope::External;
    }

    match Url::parse(link) {
        Ok(parsed) => scope_of_absolute(parsed, root),
        Err(::url::ParseError::RelativeUrlWithoutBase) => {
            if link.starts_with("//") {
                match root.url().join(link) {
                    Ok(parsed) => scope_of_absolute(parsed, root),
                    Err(_) => LinkScope::External,
                }
            } else {
                LinkScope::Relative(link.to_string())
            }
        }
        Err(e) => {
            tracing::trace!("Dropping unparseable link {}: {}", link, e);
            LinkScope::External
        }
    }
}

fn scope_of_absolute(parsed: Url, root: &RootContext) -> LinkScope {
    if !matches!(parsed.scheme(), "http" | "https") {
        return LinkScope::External;
    }

    match extract_host(&parsed) {
        Some(host) if host == root.host() => LinkScope::SameHost(parsed),
        _ => LinkScope::External,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> RootContext {
        parse_root("http://example.com/").unwrap()
    }

    #[test]
    fn test_same_host_absolute() {
        let scope = classify("http://example.com/about", &root());
        assert_eq!(
            scope,
            LinkScope::SameHost(Url::parse("http://example.com/about").unwrap())
        );
    }

    #[test]
    fn test_same_host_other_scheme_and_case() {
        assert!(matches!(
            classify("https://EXAMPLE.com/secure", &root()),
            LinkScope::SameHost(_)
        ));
    }

    #[test]
    fn test_same_host_ignores_port() {
        assert!(matches!(
            classify("http://example.com:8080/alt", &root()),
            LinkScope::SameHost(_)
        ));
    }

    #[test]
    fn test_external_host() {
        assert_eq!(classify("http://other.com/x", &root()), LinkScope::External);
    }

    #[test]
    fn test_subdomain_is_external() {
        assert_eq!(
            classify("http://blog.example.com/", &root()),
            LinkScope::External
        );
    }

    #[test]
    fn test_relative_forms() {
        for link in ["/about", "about", "../up", "?page=2", "#top"] {
            assert_eq!(
                classify(link, &root()),
                LinkScope::Relative(link.to_string()),
                "{} should be relative",
                link
            );
        }
    }

    #[test]
    fn test_relative_is_trimmed() {
        assert_eq!(
            classify("  /padded \n", &root()),
            LinkScope::Relative("/padded".to_string())
        );
    }

    #[test]
    fn test_protocol_relative_same_host() {
        assert_eq!(
            classify("//example.com/cdn", &root()),
            LinkScope::SameHost(Url::parse("http://example.com/cdn").unwrap())
        );
    }

    #[test]
    fn test_protocol_relative_other_host() {
        assert_eq!(classify("//other.com/cdn", &root()), LinkScope::External);
    }

    #[test]
    fn test_non_web_schemes_dropped() {
        for link in [
            "mailto:someone@example.com",
            "javascript:void(0)",
            "tel:+123",
            "ftp://example.com/file",
        ] {
            assert_eq!(classify(link, &root()), LinkScope::External, "{}", link);
        }
    }

    #[test]
    fn test_empty_link_dropped() {
        assert_eq!(classify("   ", &root()), LinkScope::External);
    }
}
