//! Postman v2.1 collection format
//!
//! Field names and nesting follow the Postman import format exactly; the
//! generated file is meant to be imported as-is.

use crate::collection::record::{EndpointRecord, Parameter};
use serde::{Deserialize, Serialize};

/// Schema identifier written to `info.schema`
pub const POSTMAN_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Host placeholder; the real host comes from a Postman environment
pub const BASE_URL_VARIABLE: &str = "{{base_url}}";

/// Body mode for form parameters
pub const URLENCODED_MODE: &str = "urlencoded";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanCollection {
    pub info: PostmanInfo,
    pub item: Vec<PostmanItem>,
    pub auth: PostmanAuth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanInfo {
    pub name: String,
    pub schema: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanItem {
    pub name: String,
    pub request: PostmanRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanRequest {
    pub method: String,
    pub header: Vec<String>,
    pub body: PostmanBody,
    pub url: PostmanUrl,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanBody {
    pub mode: String,
    pub urlencoded: Vec<PostmanKeyValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanUrl {
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
    pub query: Vec<PostmanKeyValue>,
    pub variable: Vec<PostmanKeyValue>,
}

/// A parameter entry; `value` carries the type annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanKeyValue {
    pub key: String,
    pub value: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanAuth {
    #[serde(rename = "type")]
    pub kind: String,
    pub apikey: Vec<PostmanApiKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostmanApiKey {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl PostmanAuth {
    /// API key sent as the `apiKey` query parameter, value taken from `{{api_key}}`
    pub fn api_key_placeholder() -> Self {
        let entry = |key: &str, value: &str| PostmanApiKey {
            key: key.to_string(),
            value: value.to_string(),
            kind: "string".to_string(),
        };

        Self {
            kind: "apikey".to_string(),
            apikey: vec![
                entry("in", "query"),
                entry("key", "apiKey"),
                entry("value", "{{api_key}}"),
            ],
        }
    }
}

impl From<&Parameter> for PostmanKeyValue {
    fn from(param: &Parameter) -> Self {
        Self {
            key: param.key.clone(),
            value: param.type_annotation.clone(),
            description: param.description.clone(),
            kind: String::new(),
        }
    }
}

impl From<&PostmanKeyValue> for Parameter {
    fn from(kv: &PostmanKeyValue) -> Self {
        Self {
            key: kv.key.clone(),
            type_annotation: kv.value.clone(),
            description: kv.description.clone(),
        }
    }
}

fn key_values(params: &[Parameter]) -> Vec<PostmanKeyValue> {
    params.iter().map(PostmanKeyValue::from).collect()
}

fn parameters(kvs: &[PostmanKeyValue]) -> Vec<Parameter> {
    kvs.iter().map(Parameter::from).collect()
}

impl From<&EndpointRecord> for PostmanItem {
    fn from(record: &EndpointRecord) -> Self {
        Self {
            name: record.name.clone(),
            request: PostmanRequest {
                method: record.method.clone(),
                header: Vec::new(),
                body: PostmanBody {
                    mode: URLENCODED_MODE.to_string(),
                    urlencoded: key_values(&record.body_params),
                },
                url: PostmanUrl {
                    raw: record.url.clone(),
                    host: vec![BASE_URL_VARIABLE.to_string()],
                    path: record.path.clone(),
                    query: key_values(&record.query_params),
                    variable: key_values(&record.path_params),
                },
                description: record.description.clone(),
            },
        }
    }
}

impl From<&PostmanItem> for EndpointRecord {
    fn from(item: &PostmanItem) -> Self {
        let request = &item.request;
        Self {
            name: item.name.clone(),
            description: request.description.clone(),
            method: request.method.clone(),
            url: request.url.raw.clone(),
            path: request.url.path.clone(),
            query_params: parameters(&request.url.query),
            path_params: parameters(&request.url.variable),
            body_params: parameters(&request.body.urlencoded),
        }
    }
}
