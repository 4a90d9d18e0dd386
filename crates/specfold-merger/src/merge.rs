//! The document merge fold and derived statistics.

use serde::Serialize;
use specfold_spec_parser::Document;

use crate::error::MergeError;

/// Aggregate counts derived from a merged document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub total_files: usize,
    pub total_paths: usize,
    pub total_schemas: usize,
    pub total_tags: usize,
}

impl MergeStats {
    /// Count the merged document's collections. Key collisions have
    /// already collapsed into the maps by this point, so the counts
    /// reflect the final state, not the sum of the inputs.
    pub fn from_document(doc: &Document, total_files: usize) -> Self {
        Self {
            total_files,
            total_paths: doc.paths.len(),
            total_schemas: doc.components.schemas.len(),
            total_tags: doc.tags.len(),
        }
    }
}

/// Fold a sequence of normalized documents into one.
///
/// The first document becomes the accumulator and is returned mutated;
/// each later document overlays its paths and components (last writer
/// wins on key collision) and appends its tags without deduplication.
/// Servers are untouched: every document entering the fold already
/// carries the identical configured server list.
pub fn merge_documents(docs: Vec<Document>) -> Result<Document, MergeError> {
    let mut docs = docs.into_iter();
    let mut merged = docs.next().ok_or(MergeError::EmptyInput)?;

    for doc in docs {
        merged.paths.extend(doc.paths);

        merged.components.schemas.extend(doc.components.schemas);
        merged.components.responses.extend(doc.components.responses);
        merged.components.parameters.extend(doc.components.parameters);
        merged
            .components
            .request_bodies
            .extend(doc.components.request_bodies);
        merged.components.headers.extend(doc.components.headers);

        merged.tags.extend(doc.tags);
    }

    Ok(merged)
}
