use url::Url;

/// Extracts the lowercase host of a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use backlog_postman::url::extract_domain;
///
/// let url = Url::parse("https://Developer.Nulab.com/docs/backlog").unwrap();
/// assert_eq!(extract_domain(&url), Some("developer.nulab.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks if a domain matches a pattern
///
/// `"nulab.com"` matches only itself. `"*.nulab.com"` matches the bare
/// domain and any subdomain at any depth.
///
/// # Examples
///
/// ```
/// use backlog_postman::url::matches_wildcard;
///
/// assert!(matches_wildcard("developer.nulab.com", "developer.nulab.com"));
/// assert!(matches_wildcard("*.nulab.com", "developer.nulab.com"));
/// assert!(!matches_wildcard("*.nulab.com", "nulab.com.evil.org"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    if let Some(base) = pattern.strip_prefix("*.") {
        candidate == base || candidate.ends_with(&format!(".{}", base))
    } else {
        candidate == pattern
    }
}

/// Returns true when the URL's host falls under the allowed domain pattern
pub fn is_allowed(url: &Url, allowed_domain: &str) -> bool {
    extract_domain(url)
        .map(|domain| matches_wildcard(&allowed_domain.to_lowercase(), &domain))
        .unwrap_or(false)
}
