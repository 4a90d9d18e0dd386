//! Normalization of detected documents to the canonical OpenAPI 3.0.1 form.

use crate::convert::{swagger_to_openapi, SwaggerDocument};
use crate::error::SpecError;
use crate::model::{Document, Encoding, Server, VersionTag, OPENAPI_VERSION};

/// Normalize a raw document to the canonical OpenAPI 3.0.1 representation.
///
/// OpenAPI 3 input parses directly; anything else is treated as Swagger 2
/// and converted. Afterwards the version is pinned to
/// [`OPENAPI_VERSION`] and `servers` is replaced wholesale with the
/// configured list — the source document's own servers are discarded.
pub fn normalize(
    bytes: &[u8],
    tag: &VersionTag,
    servers: &[Server],
) -> Result<Document, SpecError> {
    let mut doc = if tag.version.starts_with("3.") {
        parse_v3(bytes, tag.encoding)?
    } else {
        let json_bytes = match tag.encoding {
            // Normalize the wire format before the structural parse.
            Encoding::Yaml => yaml_to_json_bytes(bytes)?,
            Encoding::Json => bytes.to_vec(),
        };
        let swagger: SwaggerDocument = serde_json::from_slice(&json_bytes)
            .map_err(|e| SpecError::Parse(e.to_string()))?;
        swagger_to_openapi(swagger)?
    };

    doc.openapi = OPENAPI_VERSION.to_string();
    doc.servers = servers.to_vec();
    Ok(doc)
}

fn parse_v3(bytes: &[u8], encoding: Encoding) -> Result<Document, SpecError> {
    match encoding {
        Encoding::Yaml => {
            serde_yaml::from_slice(bytes).map_err(|e| SpecError::Parse(e.to_string()))
        }
        Encoding::Json => {
            serde_json::from_slice(bytes).map_err(|e| SpecError::Parse(e.to_string()))
        }
    }
}

fn yaml_to_json_bytes(bytes: &[u8]) -> Result<Vec<u8>, SpecError> {
    let value: serde_json::Value =
        serde_yaml::from_slice(bytes).map_err(|e| SpecError::Parse(e.to_string()))?;
    serde_json::to_vec(&value).map_err(|e| SpecError::Parse(e.to_string()))
}
