use crate::UrlError;
use url::Url;

/// Normalizes a discovered link so equal pages compare equal
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject schemes other than HTTP and HTTPS
/// 3. Lowercase the host
/// 4. Remove the fragment (in-page anchors point at the same page)
/// 5. Remove an empty query string (trailing `?`)
///
/// The path is left untouched: endpoint slugs are case- and slash-sensitive
/// on the documentation site.
///
/// # Examples
///
/// ```
/// use backlog_postman::url::normalize_url;
///
/// let url = normalize_url("https://Developer.Nulab.com/docs/backlog/api/2/get-space#response").unwrap();
/// assert_eq!(url.as_str(), "https://developer.nulab.com/docs/backlog/api/2/get-space");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let host = url.host_str().ok_or(UrlError::MissingDomain)?.to_lowercase();
    url.set_host(Some(&host))
        .map_err(|e| UrlError::Parse(format!("Failed to set host: {}", e)))?;

    url.set_fragment(None);

    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}

/// Splits an endpoint URL template into Postman path segments
///
/// The first segment (empty for a leading `/`) is discarded; everything
/// after it is kept as-is, including `:variable` placeholders.
///
/// # Examples
///
/// ```
/// use backlog_postman::url::split_path;
///
/// assert_eq!(split_path("/api/v2/issues"), vec!["api", "v2", "issues"]);
/// assert!(split_path("").is_empty());
/// ```
pub fn split_path(raw: &str) -> Vec<String> {
    raw.split('/').skip(1).map(str::to_string).collect()
}
