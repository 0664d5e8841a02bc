//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageKind`: which of the two crawl stages a page belongs to (index or endpoint)
//! - `PageState`: lifecycle of a single page (discovered, fetching, extracted, skipped, failed)

mod page_state;

pub use page_state::{PageKind, PageState};
