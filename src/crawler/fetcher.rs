//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests for the index page and endpoint pages
//! - Following redirects only while they stay on the allowed domain
//! - Classifying failures (HTTP status, network error, non-HTML content)
//!
//! Failed fetches are not retried.

use crate::config::UserAgentConfig;
use crate::url::is_allowed;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Maximum number of redirects followed for one request
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Redirect to a host outside the allowed domain (not followed)
    OffDomainRedirect {
        /// The redirect target, from the Location header
        location: String,
    },

    /// Non-success HTTP status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, DNS, body read failure)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the body of a successful fetch, or a description of the failure
    pub fn into_body(self) -> Result<String, String> {
        match self {
            Self::Success { body, .. } => Ok(body),
            Self::ContentMismatch { content_type } => {
                Err(format!("expected HTML, got {}", content_type))
            }
            Self::OffDomainRedirect { location } => {
                Err(format!("redirect to {} leaves the allowed domain", location))
            }
            Self::HttpError { status_code } => Err(format!(
                "HTTP {} ({})",
                status_code,
                describe_status(status_code)
            )),
            Self::NetworkError { error } => Err(error),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed only to URLs matching `allowed_domain`. A redirect
/// leaving the domain is not followed; the 3xx response is returned as-is and
/// [`fetch_url`] reports it as [`FetchResult::OffDomainRedirect`].
///
/// # Example
///
/// ```no_run
/// use backlog_postman::config::UserAgentConfig;
/// use backlog_postman::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(
///     &UserAgentConfig::default(),
///     "developer.nulab.com",
///     Duration::from_secs(30),
/// )
/// .unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    allowed_domain: &str,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    let allowed_domain = allowed_domain.to_string();
    let redirect_policy = Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if is_allowed(attempt.url(), &allowed_domain) {
            attempt.follow()
        } else {
            tracing::warn!("Not following off-domain redirect to {}", attempt.url());
            attempt.stop()
        }
    });

    Client::builder()
        .user_agent(user_agent)
        .redirect(redirect_policy)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true for Content-Type values the extractor can read
fn is_html(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
}

/// Fetches a URL with a single GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx, HTML or no Content-Type | `Success` |
/// | 2xx, other Content-Type | `ContentMismatch` |
/// | 3xx left unfollowed by the redirect policy | `OffDomainRedirect` |
/// | Other non-2xx status (after redirects) | `HttpError` |
/// | Timeout, connection or body error | `NetworkError` |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if status.is_redirection() {
        if let Some(location) = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
        {
            return FetchResult::OffDomainRedirect {
                location: location.to_string(),
            };
        }
    }

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.is_empty() && !is_html(&content_type) {
        return FetchResult::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Status codes worth calling out in logs
pub fn describe_status(status_code: u16) -> &'static str {
    match StatusCode::from_u16(status_code) {
        Ok(StatusCode::NOT_FOUND) => "page not found",
        Ok(StatusCode::TOO_MANY_REQUESTS) => "rate limited",
        Ok(status) if status.is_server_error() => "server error",
        _ => "unexpected status",
    }
}
