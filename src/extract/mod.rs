//! Field extraction from endpoint documentation pages
//!
//! This module contains:
//! - The page-level field extractor (name, description, method, URL, parameter tables)
//! - The parameter table row builder with annotation relocation
//! - Ordered fallback lookups shared by both

mod page;
mod strategy;
mod table;

pub use page::{
    find_description, find_name, split_request_line, FieldExtractor, PageFields,
    DESCRIPTION_STRATEGIES, NAME_STRATEGIES,
};
pub use strategy::{element_text, first_non_empty, parse_selector, select_scope, select_text};
pub use table::{build_parameters, split_annotation, Column, ParameterRow, COLUMN_MAP};
