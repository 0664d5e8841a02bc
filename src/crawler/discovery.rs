//! Endpoint link discovery on the index page
//!
//! The index page lists every endpoint in its navigation. Links are picked
//! out with the locale's link selector, resolved against the index page URL
//! and kept only when they stay on the allowed domain.

use crate::extract::parse_selector;
use crate::url::{is_allowed, normalize_url};
use crate::CollectorError;
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// An endpoint page found on the index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    /// Position among the kept links, in document order
    pub index: usize,

    /// Absolute endpoint page URL, fragment removed
    pub url: Url,
}

/// Options for a discovery pass
#[derive(Debug, Clone)]
pub struct DiscoveryOptions<'a> {
    /// CSS selector matching endpoint links
    pub link_selector: &'a str,

    /// Domain pattern links must match
    pub allowed_domain: &'a str,

    /// Keep only the first link to each page
    pub deduplicate: bool,
}

/// Collects endpoint page links from the index page
///
/// # Link Rules
///
/// **Include:** elements matching `link_selector` with an `href` that
/// resolves to an HTTP(S) URL on the allowed domain.
///
/// **Exclude:** `javascript:`, `mailto:`, `tel:` and `data:` links,
/// fragment-only links, and links to other domains.
///
/// Repeated links are kept unless `deduplicate` is set.
///
/// # Errors
///
/// Returns `CollectorError::Selector` if the link selector does not parse.
///
/// # Example
///
/// ```
/// use backlog_postman::crawler::{discover_endpoints, DiscoveryOptions};
/// use url::Url;
///
/// let html = r#"<nav><a href="/docs/backlog/api/2/get-space">Get Space</a></nav>"#;
/// let base = Url::parse("https://developer.nulab.com/docs/backlog").unwrap();
/// let links = discover_endpoints(html, &base, &DiscoveryOptions {
///     link_selector: "a[href^='/docs/backlog/api/2/']",
///     allowed_domain: "developer.nulab.com",
///     deduplicate: false,
/// }).unwrap();
///
/// assert_eq!(links[0].url.as_str(), "https://developer.nulab.com/docs/backlog/api/2/get-space");
/// ```
pub fn discover_endpoints(
    html: &str,
    base_url: &Url,
    options: &DiscoveryOptions<'_>,
) -> Result<Vec<DiscoveredLink>, CollectorError> {
    let selector = parse_selector(options.link_selector).ok_or_else(|| CollectorError::Selector {
        selector: options.link_selector.to_string(),
        message: "not a valid CSS selector".to_string(),
    })?;

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(url) = resolve_link(href, base_url) else {
            tracing::debug!("Skipping unusable link: {}", href);
            continue;
        };

        if !is_allowed(&url, options.allowed_domain) {
            tracing::debug!("Skipping off-domain link: {}", url);
            continue;
        }

        if options.deduplicate && !seen.insert(url.clone()) {
            tracing::debug!("Skipping repeated link: {}", url);
            continue;
        }

        links.push(DiscoveredLink {
            index: links.len(),
            url,
        });
    }

    Ok(links)
}

/// Resolves a link href to an absolute, normalized URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel:, data: schemes
/// - fragment-only links (same page anchors)
/// - invalid or non-HTTP(S) URLs
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    normalize_url(absolute.as_str()).ok()
}
