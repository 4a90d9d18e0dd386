//! Merge pipeline for Swagger/OpenAPI documents.
//!
//! Reads each input locator (file path or HTTP URL), detects its schema
//! version, normalizes it to OpenAPI 3.0.1 with the configured server
//! list, folds all documents into one, and writes the result as YAML.
//! Fail-fast: the first error on any input aborts the run before output
//! is written.

pub mod error;
pub mod merge;
pub mod pipeline;
pub mod source;

pub use error::MergeError;
pub use merge::{merge_documents, MergeStats};
pub use pipeline::{default_servers, MergeConfig, Pipeline};
pub use source::read_locator;
