use thiserror::Error;

/// Errors produced while detecting, parsing, or converting a document.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Neither a `swagger` nor an `openapi` root key was found.
    #[error("unable to detect swagger/openapi version")]
    UnknownFormat,

    /// Structural decode of a recognized-version document failed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Swagger 2.0 to OpenAPI 3.0 structural conversion failed.
    #[error("conversion to OpenAPI 3.0 failed: {0}")]
    Conversion(String),
}
