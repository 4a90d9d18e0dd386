use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The version stamped on every normalized document.
pub const OPENAPI_VERSION: &str = "3.0.1";

/// Wire encoding of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Yaml,
    Json,
}

/// Schema version and wire encoding detected from a raw document.
///
/// Derived once per input; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct VersionTag {
    /// The value of the `swagger` or `openapi` root key, coerced to a string.
    pub version: String,
    /// The encoding the document was written in.
    pub encoding: Encoding,
}

/// An API server entry (`servers[]` in OpenAPI 3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(default)]
    pub description: String,
}

/// The canonical OpenAPI 3 document.
///
/// Only the fields the merge operates on are typed. Everything else is
/// carried as opaque [`Value`]s and serialized back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub openapi: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub info: Value,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    /// Path template -> path item. Keys are unique; `BTreeMap` keeps
    /// serialization order deterministic.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub paths: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub components: Components,

    /// Tag declarations, order preserved. The merge concatenates these
    /// without deduplication, so duplicates by name are legal here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Value>,

    /// Root keys the merge does not interpret (`security`, `externalDocs`,
    /// vendor extensions).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The `components` object, one map per reusable definition kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Value>,

    #[serde(default, rename = "requestBodies", skip_serializing_if = "BTreeMap::is_empty")]
    pub request_bodies: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Value>,

    /// Component kinds the merge does not fold key-by-key
    /// (`securitySchemes`, `links`, `callbacks`, `examples`).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
            && self.responses.is_empty()
            && self.parameters.is_empty()
            && self.request_bodies.is_empty()
            && self.headers.is_empty()
            && self.extra.is_empty()
    }
}
