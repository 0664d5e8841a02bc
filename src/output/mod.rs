//! Output module for the collection file and run report
//!
//! This module handles:
//! - Writing the Postman collection JSON
//! - Rendering and logging the run report

mod report;
mod writer;

pub use report::{write_report, CrawlReport};
pub use writer::{render_collection, write_collection};
