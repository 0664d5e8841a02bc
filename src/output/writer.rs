//! Collection file writer

use crate::collection::Collection;
use crate::CollectorError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Serializes the collection as pretty-printed Postman JSON
pub fn render_collection(collection: &Collection) -> Result<String, CollectorError> {
    Ok(serde_json::to_string_pretty(&collection.to_postman())?)
}

/// Writes the collection to `output_path`, replacing any existing file
///
/// # Errors
///
/// Returns `CollectorError::Write` naming the path if the file cannot be
/// created or written.
///
/// # Example
///
/// ```no_run
/// use backlog_postman::collection::Collection;
/// use backlog_postman::output::write_collection;
/// use std::path::Path;
///
/// let collection = Collection { name: "Backlog API".to_string(), items: vec![] };
/// write_collection(&collection, Path::new("backlog_api_postman_collection.json")).unwrap();
/// ```
pub fn write_collection(collection: &Collection, output_path: &Path) -> Result<(), CollectorError> {
    let json = render_collection(collection)?;

    let write_error = |e: std::io::Error| CollectorError::Write {
        path: output_path.display().to_string(),
        reason: e.to_string(),
    };

    let mut file = File::create(output_path).map_err(write_error)?;
    file.write_all(json.as_bytes()).map_err(write_error)?;
    file.write_all(b"\n").map_err(write_error)?;

    tracing::info!(
        "Wrote {} items to {}",
        collection.items.len(),
        output_path.display()
    );

    Ok(())
}
