//! Ordered fallback lookups
//!
//! Documentation pages are not uniformly structured. Where one rule fails on
//! some pages, the extractor lists alternative rules in order and keeps the
//! first one that produces text.

use scraper::{ElementRef, Html, Selector};

/// Runs each strategy in order and returns the first non-empty result
///
/// Returns an empty string when every strategy comes up empty.
///
/// # Examples
///
/// ```
/// use backlog_postman::extract::first_non_empty;
///
/// let found = first_non_empty(&["h1", "h2"], |tag| match tag {
///     "h2" => "Fallback title".to_string(),
///     _ => String::new(),
/// });
/// assert_eq!(found, "Fallback title");
/// ```
pub fn first_non_empty<S, F>(strategies: &[S], mut lookup: F) -> String
where
    S: AsRef<str>,
    F: FnMut(&str) -> String,
{
    for strategy in strategies {
        let value = lookup(strategy.as_ref());
        if !value.is_empty() {
            return value;
        }
    }
    String::new()
}

/// Parses a CSS selector, logging and discarding invalid ones
pub fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!("Ignoring invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

/// Collects an element's text with surrounding whitespace removed
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the first element under `scope` matching `css`, or an empty string
pub fn select_text(scope: ElementRef<'_>, css: &str) -> String {
    parse_selector(css)
        .and_then(|selector| scope.select(&selector).next())
        .map(element_text)
        .unwrap_or_default()
}

/// The first element of the document matching any of `selectors`, tried in order
///
/// Falls back to the document root when nothing matches.
pub fn select_scope<'a, S: AsRef<str>>(document: &'a Html, selectors: &[S]) -> ElementRef<'a> {
    selectors
        .iter()
        .filter_map(|css| parse_selector(css.as_ref()))
        .find_map(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element())
}
