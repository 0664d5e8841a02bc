//! Endpoint records and the collection they are gathered into
//!
//! This module handles:
//! - The endpoint record and parameter data model
//! - Assembling records from extracted page fields
//! - Accumulating records from concurrent crawl tasks
//! - Converting the finished collection to the Postman format

mod assemble;
pub mod postman;
mod record;
mod store;

pub use assemble::assemble_endpoint;
pub use postman::{PostmanAuth, PostmanCollection, PostmanInfo, PostmanItem, POSTMAN_SCHEMA};
pub use record::{EndpointRecord, Parameter};
pub use store::CollectionStore;

/// The finished, ordered set of endpoint records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    /// Collection name shown in Postman
    pub name: String,

    /// Endpoint records in output order
    pub items: Vec<EndpointRecord>,
}

impl Collection {
    /// Converts to the Postman document, adding schema and auth metadata
    pub fn to_postman(&self) -> PostmanCollection {
        PostmanCollection {
            info: PostmanInfo {
                name: self.name.clone(),
                schema: POSTMAN_SCHEMA.to_string(),
            },
            item: self.items.iter().map(PostmanItem::from).collect(),
            auth: PostmanAuth::api_key_placeholder(),
        }
    }
}

impl From<&PostmanCollection> for Collection {
    fn from(postman: &PostmanCollection) -> Self {
        Self {
            name: postman.info.name.clone(),
            items: postman.item.iter().map(EndpointRecord::from).collect(),
        }
    }
}
