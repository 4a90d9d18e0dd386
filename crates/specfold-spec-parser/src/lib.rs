//! Swagger 2.0 and OpenAPI 3.0 document handling.
//!
//! Detects the schema version and wire encoding of a raw document,
//! converts Swagger 2.0 documents to OpenAPI 3.0, and normalizes every
//! input to a canonical OpenAPI 3.0.1 representation carrying a fixed
//! server list.

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod normalize;

pub use detect::detect_version;
pub use error::SpecError;
pub use model::{Components, Document, Encoding, Server, VersionTag, OPENAPI_VERSION};
pub use normalize::normalize;
