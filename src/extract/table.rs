//! Parameter table rows to [`Parameter`] values
//!
//! Every parameter table on the documentation site has the same three
//! columns: name, type, description. Names may carry a trailing qualifier
//! such as `issueId (required)`; the qualifier is moved to the end of the
//! description so the key is usable as-is in a request.

use crate::collection::Parameter;
use regex::Regex;
use std::sync::OnceLock;

/// A named field of a parameter row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Type,
    Description,
}

/// Cell index to field mapping; cells past the last entry are ignored
pub const COLUMN_MAP: &[(usize, Column)] = &[
    (0, Column::Name),
    (1, Column::Type),
    (2, Column::Description),
];

/// One table row with its cells mapped to named fields
///
/// A field is `None` when the row has no cell at that position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterRow {
    pub name: Option<String>,
    pub type_name: Option<String>,
    pub description: Option<String>,
}

impl ParameterRow {
    /// Maps trimmed cell texts to fields through [`COLUMN_MAP`]
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let mut row = Self::default();

        for &(index, column) in COLUMN_MAP {
            let Some(cell) = cells.get(index) else {
                continue;
            };
            let text = Some(cell.as_ref().trim().to_string());
            match column {
                Column::Name => row.name = text,
                Column::Type => row.type_name = text,
                Column::Description => row.description = text,
            }
        }

        row
    }

    /// Converts the row into a parameter, relocating any name annotation
    pub fn into_parameter(self) -> Parameter {
        let (key, annotation) = match self.name.as_deref() {
            Some(name) => split_annotation(name),
            None => (String::new(), None),
        };

        let type_annotation = self
            .type_name
            .map(|type_name| format!("<{}>", type_name))
            .unwrap_or_default();

        let description = match (self.description, annotation) {
            (Some(description), Some(annotation)) => format!("{} {}", description, annotation),
            (Some(description), None) => description,
            (None, _) => String::new(),
        };

        Parameter {
            key,
            type_annotation,
            description,
        }
    }
}

fn annotation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s*(\(.+\))").expect("annotation pattern is valid"))
}

/// Splits a parameter name cell into its key and parenthesized annotation
///
/// # Examples
///
/// ```
/// use backlog_postman::extract::split_annotation;
///
/// assert_eq!(
///     split_annotation("count (optional)"),
///     ("count".to_string(), Some("(optional)".to_string()))
/// );
/// assert_eq!(split_annotation("projectId"), ("projectId".to_string(), None));
/// ```
pub fn split_annotation(text: &str) -> (String, Option<String>) {
    let pattern = annotation_pattern();
    let key = pattern.replace_all(text, "").into_owned();
    let annotation = pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string());
    (key, annotation)
}

/// Builds one parameter per row, preserving row order
pub fn build_parameters<I, R, S>(rows: I) -> Vec<Parameter>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    rows.into_iter()
        .map(|cells| ParameterRow::from_cells(cells.as_ref()).into_parameter())
        .collect()
}
