use crate::collection::record::EndpointRecord;
use crate::extract::PageFields;
use crate::url::split_path;

/// Combines the fields read from one page into an endpoint record
///
/// The raw URL is kept as written; its path segments are derived from it.
/// Logs one `"<name> -> <method> <url>"` progress line per record.
///
/// # Example
///
/// ```
/// use backlog_postman::collection::assemble_endpoint;
/// use backlog_postman::extract::PageFields;
///
/// let record = assemble_endpoint(PageFields {
///     name: "Get Space".to_string(),
///     method: "GET".to_string(),
///     url: "/api/v2/space".to_string(),
///     ..Default::default()
/// });
/// assert_eq!(record.path, vec!["api", "v2", "space"]);
/// assert_eq!(record.url, "/api/v2/space");
/// ```
pub fn assemble_endpoint(fields: PageFields) -> EndpointRecord {
    tracing::info!("{} -> {} {}", fields.name, fields.method, fields.url);

    let path = split_path(&fields.url);

    EndpointRecord {
        name: fields.name,
        description: fields.description,
        method: fields.method,
        url: fields.url,
        path,
        query_params: fields.query_params,
        path_params: fields.path_params,
        body_params: fields.body_params,
    }
}
