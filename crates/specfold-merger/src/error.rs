use std::path::PathBuf;

use specfold_spec_parser::SpecError;
use thiserror::Error;

/// Errors produced by the merge pipeline.
///
/// Variants carry the locator or path they failed on; message rendering
/// is left to the `Display` impls.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Local file read failed.
    #[error("failed to read {locator}: {source}")]
    ReadFailed {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP fetch failed or returned a non-2xx status.
    #[error("failed to fetch {locator}: {detail}")]
    FetchFailed { locator: String, detail: String },

    /// Version detection, parsing, or conversion failed for one input.
    #[error("failed to process {locator}: {source}")]
    Spec {
        locator: String,
        #[source]
        source: SpecError,
    },

    /// The merge was invoked with no documents.
    #[error("no documents to merge")]
    EmptyInput,

    /// The merged document could not be serialized as YAML.
    #[error("failed to serialize merged document: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The merged document could not be written to the output path.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
