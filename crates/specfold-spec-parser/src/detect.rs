use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::error::SpecError;
use crate::model::{Encoding, VersionTag};

/// Root keys that identify a document's schema version, in precedence
/// order: `swagger` is checked before `openapi`.
const VERSION_KEYS: &[&str] = &["swagger", "openapi"];

/// Detect the schema version and wire encoding of a raw document.
///
/// A generic YAML decode runs first (YAML being the more general syntax),
/// then a JSON decode. JSON is a syntactic subset of YAML, so input that
/// decodes both ways is classified as JSON.
pub fn detect_version(bytes: &[u8]) -> Result<VersionTag, SpecError> {
    if let Ok(root) = serde_yaml::from_slice::<YamlValue>(bytes) {
        if root.is_mapping() {
            for key in VERSION_KEYS {
                if let Some(value) = root.get(key) {
                    let encoding = if serde_json::from_slice::<JsonValue>(bytes).is_ok() {
                        Encoding::Json
                    } else {
                        Encoding::Yaml
                    };
                    return Ok(VersionTag {
                        version: yaml_version_string(value),
                        encoding,
                    });
                }
            }
        }
    }

    if let Ok(JsonValue::Object(root)) = serde_json::from_slice::<JsonValue>(bytes) {
        for key in VERSION_KEYS {
            if let Some(value) = root.get(*key) {
                return Ok(VersionTag {
                    version: json_version_string(value),
                    encoding: Encoding::Json,
                });
            }
        }
    }

    Err(SpecError::UnknownFormat)
}

/// Coerce the version scalar to a string, matching however the author
/// wrote it (`"2.0"`, `2.0`, even an unquoted `3.0.1`).
fn yaml_version_string(value: &YamlValue) -> String {
    match value {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn json_version_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
