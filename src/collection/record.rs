/// One documented input field of an endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name with any parenthesized annotation removed
    pub key: String,

    /// Type cell text wrapped in angle brackets, e.g. `<number>`
    pub type_annotation: String,

    /// Description cell text, followed by the relocated annotation if any
    pub description: String,
}

/// Everything known about one endpoint after extraction
///
/// Records are built once by [`assemble_endpoint`](crate::collection::assemble_endpoint)
/// and not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointRecord {
    pub name: String,
    pub description: String,
    pub method: String,

    /// URL template as written on the page, e.g. `/api/v2/issues/:issueIdOrKey`
    pub url: String,

    /// `url` split into segments, leading empty segment dropped
    pub path: Vec<String>,

    pub query_params: Vec<Parameter>,
    pub path_params: Vec<Parameter>,
    pub body_params: Vec<Parameter>,
}

impl EndpointRecord {
    /// Returns true when name, method and URL were all found
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.method.is_empty() && !self.url.is_empty()
    }
}
