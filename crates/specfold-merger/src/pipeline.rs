//! The end-to-end merge pipeline: read, detect, normalize, fold, write.

use std::fs;
use std::path::PathBuf;

use specfold_spec_parser::{detect_version, normalize, Document, Server};

use crate::error::MergeError;
use crate::merge::{merge_documents, MergeStats};
use crate::source::read_locator;

/// Configuration for a merge run.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Input locators in merge-precedence order: later entries override
    /// earlier ones on key collision.
    pub inputs: Vec<String>,
    /// Destination path for the merged YAML document.
    pub output: PathBuf,
    /// Server list stamped on every document. Empty means
    /// [`default_servers`] is substituted.
    pub servers: Vec<Server>,
}

/// Placeholder environment servers used when no override is configured.
pub fn default_servers() -> Vec<Server> {
    vec![
        Server {
            url: "https://api-dev.domain.com".to_string(),
            description: "Development Environment".to_string(),
        },
        Server {
            url: "https://api-test.domain.com".to_string(),
            description: "Test Environment".to_string(),
        },
        Server {
            url: "https://api-stg.domain.com".to_string(),
            description: "Staging Environment".to_string(),
        },
        Server {
            url: "https://api.domain.com".to_string(),
            description: "Production Environment".to_string(),
        },
    ]
}

/// Drives read → detect → normalize per input, then the merge fold.
///
/// Inputs are processed strictly in the supplied order; the fold's
/// last-write-wins semantics depend on it.
#[derive(Debug)]
pub struct Pipeline {
    config: MergeConfig,
}

impl Pipeline {
    /// Create a pipeline, substituting the default server list when none
    /// was configured.
    pub fn new(mut config: MergeConfig) -> Self {
        if config.servers.is_empty() {
            config.servers = default_servers();
        }
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Read, detect, and normalize a single input. Failures carry the
    /// locator so the aborting error names the offending input.
    fn process_input(&self, locator: &str) -> Result<Document, MergeError> {
        let bytes = read_locator(locator)?;

        let tag = detect_version(&bytes).map_err(|source| MergeError::Spec {
            locator: locator.to_string(),
            source,
        })?;
        tracing::debug!(locator = %locator, version = %tag.version, "Detected document version");

        normalize(&bytes, &tag, &self.config.servers).map_err(|source| MergeError::Spec {
            locator: locator.to_string(),
            source,
        })
    }

    /// Normalize every input in order and fold the results into one
    /// document.
    fn collect_and_merge(&self) -> Result<Document, MergeError> {
        let mut docs = Vec::with_capacity(self.config.inputs.len());
        for locator in &self.config.inputs {
            docs.push(self.process_input(locator)?);
        }
        merge_documents(docs)
    }

    /// Merge all inputs and write the result as YAML to the output path.
    ///
    /// All-or-nothing: any failure aborts before the output file is
    /// touched.
    pub fn merge(&self) -> Result<MergeStats, MergeError> {
        let merged = self.collect_and_merge()?;
        let stats = MergeStats::from_document(&merged, self.config.inputs.len());

        let yaml = serde_yaml::to_string(&merged)?;
        fs::write(&self.config.output, yaml).map_err(|source| MergeError::WriteFailed {
            path: self.config.output.clone(),
            source,
        })?;

        tracing::info!(
            output = %self.config.output.display(),
            total_files = stats.total_files,
            total_paths = stats.total_paths,
            total_schemas = stats.total_schemas,
            total_tags = stats.total_tags,
            "Merged documents written"
        );
        Ok(stats)
    }

    /// Compute statistics from a fresh run over the same inputs, without
    /// writing anything.
    pub fn stats(&self) -> Result<MergeStats, MergeError> {
        let merged = self.collect_and_merge()?;
        Ok(MergeStats::from_document(&merged, self.config.inputs.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specfold_spec_parser::OPENAPI_VERSION;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_doc(dir: &Path, name: &str, content: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn config(inputs: Vec<String>, output: PathBuf, servers: Vec<Server>) -> MergeConfig {
        MergeConfig {
            inputs,
            output,
            servers,
        }
    }

    #[test]
    fn default_servers_has_four_environments() {
        let servers = default_servers();
        assert_eq!(servers.len(), 4);
        assert_eq!(servers[0].url, "https://api-dev.domain.com");
        assert_eq!(servers[3].url, "https://api.domain.com");
    }

    #[test]
    fn empty_server_list_is_substituted() {
        let pipeline = Pipeline::new(config(Vec::new(), PathBuf::from("out.yaml"), Vec::new()));
        assert_eq!(pipeline.config().servers, default_servers());
    }

    #[test]
    fn configured_servers_are_kept_verbatim() {
        let servers = vec![Server {
            url: "https://x".to_string(),
            description: "D".to_string(),
        }];
        let pipeline = Pipeline::new(config(
            Vec::new(),
            PathBuf::from("out.yaml"),
            servers.clone(),
        ));
        assert_eq!(pipeline.config().servers, servers);
    }

    #[test]
    fn merges_openapi3_and_swagger2_inputs() {
        let temp = TempDir::new().unwrap();

        let doc1 = write_doc(
            temp.path(),
            "users.json",
            r#"{"openapi":"3.0.0","info":{"title":"Users","version":"1.0.0"},"paths":{"/a":{}},"components":{"schemas":{"S1":{}}}}"#,
        );
        let doc2 = write_doc(
            temp.path(),
            "pets.json",
            r#"{"swagger":"2.0","info":{"title":"Pets","version":"1.0.0"},"paths":{"/b":{}},"definitions":{"S2":{}}}"#,
        );

        let output = temp.path().join("merged.yaml");
        let servers = vec![Server {
            url: "https://x".to_string(),
            description: "D".to_string(),
        }];
        let pipeline = Pipeline::new(config(vec![doc1, doc2], output.clone(), servers.clone()));

        let stats = pipeline.merge().unwrap();
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_paths, 2);
        assert_eq!(stats.total_schemas, 2);
        assert_eq!(stats.total_tags, 0);

        let written = fs::read_to_string(&output).unwrap();
        let merged: Document = serde_yaml::from_str(&written).unwrap();
        assert_eq!(merged.openapi, OPENAPI_VERSION);
        assert!(merged.paths.contains_key("/a"));
        assert!(merged.paths.contains_key("/b"));
        assert!(merged.components.schemas.contains_key("S1"));
        assert!(merged.components.schemas.contains_key("S2"));
        assert_eq!(merged.servers, servers);
    }

    #[test]
    fn stats_rerun_matches_merge_run() {
        let temp = TempDir::new().unwrap();
        let doc1 = write_doc(
            temp.path(),
            "a.json",
            r#"{"openapi":"3.0.0","info":{"title":"A","version":"1"},"paths":{"/a":{}}}"#,
        );

        let output = temp.path().join("merged.yaml");
        let pipeline = Pipeline::new(config(vec![doc1], output, Vec::new()));

        let from_merge = pipeline.merge().unwrap();
        let from_stats = pipeline.stats().unwrap();
        assert_eq!(from_merge, from_stats);
    }

    #[test]
    fn failing_input_aborts_before_writing() {
        let temp = TempDir::new().unwrap();
        let good = write_doc(
            temp.path(),
            "good.json",
            r#"{"openapi":"3.0.0","info":{"title":"A","version":"1"},"paths":{"/a":{}}}"#,
        );
        let bad = write_doc(temp.path(), "bad.yaml", "not: a: spec: at: all");

        let output = temp.path().join("merged.yaml");
        let pipeline = Pipeline::new(config(vec![good, bad.clone()], output.clone(), Vec::new()));

        let result = pipeline.merge();
        match result {
            Err(MergeError::Spec { locator, .. }) => assert_eq!(locator, bad),
            other => panic!("expected Spec error, got {other:?}"),
        }
        assert!(!output.exists());
    }

    #[test]
    fn no_inputs_is_empty_input() {
        let temp = TempDir::new().unwrap();
        let pipeline = Pipeline::new(config(
            Vec::new(),
            temp.path().join("merged.yaml"),
            Vec::new(),
        ));
        assert!(matches!(pipeline.merge(), Err(MergeError::EmptyInput)));
    }
}
