/// Page state definitions for tracking crawl progress
///
/// The crawl has two stages. The single index page is visited first; every
/// endpoint page it links to is visited next. Endpoint pages are terminal:
/// no links are followed from them.
use crate::CollectorError;
use std::fmt;

/// The crawl stage a page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// The navigation page listing every endpoint
    Index,
    /// A page documenting one endpoint
    Endpoint,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => write!(f, "index"),
            Self::Endpoint => write!(f, "endpoint"),
        }
    }
}

/// Represents the current state of a page in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Link found on the index page, not yet requested
    Discovered,

    /// Page is currently being fetched
    Fetching,

    // ===== Terminal States =====
    /// Page was fetched and an endpoint record was assembled from it
    Extracted,

    /// Page fetch failed and the page was left out of the collection
    Skipped,

    /// Page fetch failed and the run was aborted
    Failed,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Discovered | Self::Fetching)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Extracted)
    }

    /// Returns true if this represents a fetch failure (skipped or fatal)
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Skipped | Self::Failed)
    }

    /// Moves to `next`, rejecting transitions the crawl never makes
    ///
    /// Allowed: `Discovered -> Fetching`, and `Fetching` to any terminal state.
    pub fn transition(self, next: PageState) -> Result<PageState, CollectorError> {
        let allowed = match (self, next) {
            (Self::Discovered, Self::Fetching) => true,
            (Self::Fetching, to) => to.is_terminal(),
            _ => false,
        };

        if allowed {
            Ok(next)
        } else {
            Err(CollectorError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Short lowercase name used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Fetching => "fetching",
            Self::Extracted => "extracted",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
