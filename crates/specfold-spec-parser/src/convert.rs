//! Swagger 2.0 to OpenAPI 3.0 structural conversion.
//!
//! Works on the untyped JSON tree: the typed [`SwaggerDocument`] pins down
//! the root keys the conversion interprets, while path items, schemas, and
//! parameters stay [`Value`]s and are rewritten in place.

use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::error::SpecError;
use crate::model::{Components, Document, Server, OPENAPI_VERSION};

/// HTTP verbs recognized inside a path item.
const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch",
];

/// Keywords that move from a Swagger 2 parameter into its `schema`.
const SCHEMA_KEYWORDS: &[&str] = &[
    "type",
    "format",
    "items",
    "enum",
    "default",
    "multipleOf",
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxLength",
    "minLength",
    "pattern",
    "maxItems",
    "minItems",
    "uniqueItems",
];

/// `$ref` prefix rewrites from Swagger 2 to OpenAPI 3 component paths.
const REF_REWRITES: &[(&str, &str)] = &[
    ("#/definitions/", "#/components/schemas/"),
    ("#/responses/", "#/components/responses/"),
    ("#/parameters/", "#/components/parameters/"),
];

/// The subset of a Swagger 2.0 document the conversion interprets.
///
/// Unrecognized root keys land in `extra` and pass through to the
/// converted document when they are vendor extensions.
#[derive(Debug, Clone, Deserialize)]
pub struct SwaggerDocument {
    /// Required by Swagger 2.0; its presence is the structural check.
    pub swagger: String,

    #[serde(default)]
    pub info: Value,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default, rename = "basePath")]
    pub base_path: Option<String>,

    #[serde(default)]
    pub schemes: Vec<String>,

    #[serde(default)]
    pub consumes: Vec<String>,

    #[serde(default)]
    pub produces: Vec<String>,

    #[serde(default)]
    pub paths: BTreeMap<String, Value>,

    #[serde(default)]
    pub definitions: BTreeMap<String, Value>,

    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,

    #[serde(default)]
    pub responses: BTreeMap<String, Value>,

    #[serde(default, rename = "securityDefinitions")]
    pub security_definitions: BTreeMap<String, Value>,

    #[serde(default)]
    pub security: Option<Value>,

    #[serde(default)]
    pub tags: Vec<Value>,

    #[serde(default, rename = "externalDocs")]
    pub external_docs: Option<Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Convert a parsed Swagger 2.0 document to OpenAPI 3.0.
pub fn swagger_to_openapi(doc: SwaggerDocument) -> Result<Document, SpecError> {
    let servers = synthesize_servers(&doc);

    let mut components = Components::default();

    for (name, schema) in doc.definitions {
        components.schemas.insert(name, rewrite_refs(schema));
    }

    for (name, response) in doc.responses {
        let converted = convert_response(rewrite_refs(response), &doc.produces)
            .map_err(|e| with_context(e, &format!("responses.{name}")))?;
        components.responses.insert(name, converted);
    }

    for (name, parameter) in doc.parameters {
        let parameter = rewrite_refs(parameter);
        if parameter_location(&parameter) == Some("body") {
            let body = convert_body_parameter(&parameter, &doc.consumes)
                .map_err(|e| with_context(e, &format!("parameters.{name}")))?;
            components.request_bodies.insert(name, body);
        } else {
            let converted = convert_parameter(parameter)
                .map_err(|e| with_context(e, &format!("parameters.{name}")))?;
            components.parameters.insert(name, converted);
        }
    }

    if !doc.security_definitions.is_empty() {
        let mut schemes = Map::new();
        for (name, definition) in doc.security_definitions {
            let converted = convert_security_scheme(definition)
                .map_err(|e| with_context(e, &format!("securityDefinitions.{name}")))?;
            schemes.insert(name, converted);
        }
        components
            .extra
            .insert("securitySchemes".to_string(), Value::Object(schemes));
    }

    let mut paths = BTreeMap::new();
    for (path, item) in doc.paths {
        let converted = convert_path_item(rewrite_refs(item), &doc.consumes, &doc.produces)
            .map_err(|e| with_context(e, &path))?;
        paths.insert(path, converted);
    }

    let mut extra = BTreeMap::new();
    if let Some(security) = doc.security {
        extra.insert("security".to_string(), security);
    }
    if let Some(external_docs) = doc.external_docs {
        extra.insert("externalDocs".to_string(), external_docs);
    }
    for (key, value) in doc.extra {
        if key.starts_with("x-") {
            extra.insert(key, value);
        }
    }

    Ok(Document {
        openapi: OPENAPI_VERSION.to_string(),
        info: doc.info,
        servers,
        paths,
        components,
        tags: doc.tags,
        extra,
    })
}

/// Build the `servers` list from `host`/`basePath`/`schemes`, one entry
/// per scheme. The caller overrides this list during normalization.
fn synthesize_servers(doc: &SwaggerDocument) -> Vec<Server> {
    let host = match &doc.host {
        Some(host) => host,
        None => return Vec::new(),
    };
    let base_path = doc.base_path.as_deref().unwrap_or("");
    let schemes = if doc.schemes.is_empty() {
        vec!["https".to_string()]
    } else {
        doc.schemes.clone()
    };

    schemes
        .iter()
        .map(|scheme| Server {
            url: format!("{scheme}://{host}{base_path}"),
            description: String::new(),
        })
        .collect()
}

fn convert_path_item(
    item: Value,
    consumes: &[String],
    produces: &[String],
) -> Result<Value, SpecError> {
    let obj = match item {
        Value::Object(obj) => obj,
        _ => return Err(SpecError::Conversion("path item must be an object".into())),
    };

    let mut out = Map::new();
    for (key, value) in obj {
        if HTTP_METHODS.contains(&key.as_str()) {
            let converted = convert_operation(value, consumes, produces)
                .map_err(|e| with_context(e, &key))?;
            out.insert(key, converted);
        } else if key == "parameters" {
            out.insert(key, convert_shared_parameters(value)?);
        } else {
            out.insert(key, value);
        }
    }
    Ok(Value::Object(out))
}

/// Convert path-level parameters. Body and formData parameters are not
/// expressible at the path level in OpenAPI 3, so they are rejected.
fn convert_shared_parameters(value: Value) -> Result<Value, SpecError> {
    let params = match value {
        Value::Array(params) => params,
        _ => return Err(SpecError::Conversion("parameters must be an array".into())),
    };

    let mut out = Vec::with_capacity(params.len());
    for param in params {
        match parameter_location(&param) {
            Some("body") | Some("formData") => {
                return Err(SpecError::Conversion(
                    "body/formData parameters are not supported at the path level".into(),
                ));
            }
            _ => out.push(convert_parameter(param)?),
        }
    }
    Ok(Value::Array(out))
}

fn convert_operation(
    value: Value,
    doc_consumes: &[String],
    doc_produces: &[String],
) -> Result<Value, SpecError> {
    let mut op = match value {
        Value::Object(op) => op,
        _ => return Err(SpecError::Conversion("operation must be an object".into())),
    };

    // Operation-level consumes/produces override the document-level lists.
    let consumes = take_string_array(&mut op, "consumes").unwrap_or_else(|| doc_consumes.to_vec());
    let produces = take_string_array(&mut op, "produces").unwrap_or_else(|| doc_produces.to_vec());

    let parameters = op.remove("parameters");
    let responses = op.remove("responses");

    let mut out = op;

    if let Some(parameters) = parameters {
        let params = match parameters {
            Value::Array(params) => params,
            _ => return Err(SpecError::Conversion("parameters must be an array".into())),
        };

        let mut kept = Vec::new();
        let mut body = None;
        let mut form_fields = Vec::new();

        for param in params {
            match parameter_location(&param) {
                Some("body") => body = Some(convert_body_parameter(&param, &consumes)?),
                Some("formData") => form_fields.push(param),
                _ => kept.push(convert_parameter(param)?),
            }
        }

        if !form_fields.is_empty() {
            body = Some(convert_form_parameters(&form_fields, &consumes)?);
        }
        if !kept.is_empty() {
            out.insert("parameters".to_string(), Value::Array(kept));
        }
        if let Some(body) = body {
            out.insert("requestBody".to_string(), body);
        }
    }

    if let Some(responses) = responses {
        let resps = match responses {
            Value::Object(resps) => resps,
            _ => return Err(SpecError::Conversion("responses must be an object".into())),
        };

        let mut converted = Map::new();
        for (code, response) in resps {
            let response = convert_response(response, &produces)
                .map_err(|e| with_context(e, &format!("responses.{code}")))?;
            converted.insert(code, response);
        }
        out.insert("responses".to_string(), Value::Object(converted));
    }

    Ok(Value::Object(out))
}

/// The `in` location of a parameter, if it is an inline (non-`$ref`) one.
fn parameter_location(param: &Value) -> Option<&str> {
    param.as_object()?.get("in")?.as_str()
}

/// Convert a non-body parameter: type-describing keywords move under
/// `schema`, `collectionFormat` maps to `style`/`explode`. `$ref`
/// parameters pass through untouched.
fn convert_parameter(param: Value) -> Result<Value, SpecError> {
    let obj = match param {
        Value::Object(obj) => obj,
        _ => return Err(SpecError::Conversion("parameter must be an object".into())),
    };
    if obj.contains_key("$ref") {
        return Ok(Value::Object(obj));
    }

    let mut out = Map::new();
    let mut schema = Map::new();
    let mut collection_format = None;

    for (key, value) in obj {
        if key == "collectionFormat" {
            collection_format = value.as_str().map(str::to_string);
        } else if SCHEMA_KEYWORDS.contains(&key.as_str()) {
            schema.insert(key, value);
        } else {
            out.insert(key, value);
        }
    }

    if let Some(format) = collection_format {
        let location = out.get("in").and_then(Value::as_str).unwrap_or("");
        let style = match (format.as_str(), location) {
            ("multi", _) => Some(("form", true)),
            ("csv", "query") => Some(("form", false)),
            ("csv", _) => Some(("simple", false)),
            ("ssv", _) => Some(("spaceDelimited", false)),
            ("pipes", _) => Some(("pipeDelimited", false)),
            _ => None,
        };
        if let Some((style, explode)) = style {
            out.insert("style".to_string(), json!(style));
            out.insert("explode".to_string(), json!(explode));
        }
    }

    if !schema.is_empty() {
        out.insert("schema".to_string(), Value::Object(schema));
    }
    Ok(Value::Object(out))
}

/// Convert an `in: body` parameter to a `requestBody` object with one
/// `content` entry per effective consumes media type.
fn convert_body_parameter(param: &Value, consumes: &[String]) -> Result<Value, SpecError> {
    let obj = param
        .as_object()
        .ok_or_else(|| SpecError::Conversion("body parameter must be an object".into()))?;

    let mut body = Map::new();
    if let Some(description) = obj.get("description") {
        body.insert("description".to_string(), description.clone());
    }
    if let Some(required) = obj.get("required") {
        body.insert("required".to_string(), required.clone());
    }

    let schema = obj.get("schema").cloned().unwrap_or_else(|| json!({}));
    let mut content = Map::new();
    for media_type in effective_media_types(consumes) {
        content.insert(media_type, json!({ "schema": schema.clone() }));
    }
    body.insert("content".to_string(), Value::Object(content));

    Ok(Value::Object(body))
}

/// Fold `in: formData` parameters into a single `requestBody` whose
/// schema is an object with one property per field.
fn convert_form_parameters(fields: &[Value], consumes: &[String]) -> Result<Value, SpecError> {
    let media_type = if consumes.iter().any(|c| c == "multipart/form-data") {
        "multipart/form-data"
    } else {
        "application/x-www-form-urlencoded"
    };

    let mut properties = Map::new();
    let mut required = Vec::new();
    let mut any_required = false;

    for field in fields {
        let obj = field
            .as_object()
            .ok_or_else(|| SpecError::Conversion("formData parameter must be an object".into()))?;
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| SpecError::Conversion("formData parameter missing 'name'".into()))?;

        if obj.get("required").and_then(Value::as_bool).unwrap_or(false) {
            required.push(json!(name));
            any_required = true;
        }

        let mut schema = Map::new();
        for (key, value) in obj {
            if SCHEMA_KEYWORDS.contains(&key.as_str()) || key == "description" {
                schema.insert(key.clone(), value.clone());
            }
        }
        // Swagger 2 `type: file` has no OpenAPI 3 equivalent other than
        // a binary string.
        if schema.get("type").and_then(Value::as_str) == Some("file") {
            schema.insert("type".to_string(), json!("string"));
            schema.insert("format".to_string(), json!("binary"));
        }
        properties.insert(name.to_string(), Value::Object(schema));
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }

    let mut body = Map::new();
    if any_required {
        body.insert("required".to_string(), json!(true));
    }
    body.insert(
        "content".to_string(),
        json!({ media_type: { "schema": Value::Object(schema) } }),
    );
    Ok(Value::Object(body))
}

/// Convert a response: `schema` moves into `content` per effective
/// produces media type; header type keywords wrap under `schema`.
fn convert_response(response: Value, produces: &[String]) -> Result<Value, SpecError> {
    let mut obj = match response {
        Value::Object(obj) => obj,
        _ => return Err(SpecError::Conversion("response must be an object".into())),
    };
    if obj.contains_key("$ref") {
        return Ok(Value::Object(obj));
    }

    let schema = obj.remove("schema");
    let headers = obj.remove("headers");
    let examples = obj.remove("examples");

    let mut out = obj;

    if let Some(schema) = schema {
        let example_map = examples.and_then(|e| match e {
            Value::Object(map) => Some(map),
            _ => None,
        });

        let mut content = Map::new();
        for media_type in effective_media_types(produces) {
            let mut entry = Map::new();
            entry.insert("schema".to_string(), schema.clone());
            if let Some(example) = example_map.as_ref().and_then(|m| m.get(&media_type)) {
                entry.insert("example".to_string(), example.clone());
            }
            content.insert(media_type, Value::Object(entry));
        }
        out.insert("content".to_string(), Value::Object(content));
    }

    if let Some(headers) = headers {
        let headers = match headers {
            Value::Object(headers) => headers,
            _ => return Err(SpecError::Conversion("response headers must be an object".into())),
        };
        let mut converted = Map::new();
        for (name, header) in headers {
            converted.insert(name, convert_header(header)?);
        }
        out.insert("headers".to_string(), Value::Object(converted));
    }

    Ok(Value::Object(out))
}

/// Convert a response header: same keyword move as a parameter, minus
/// `name`/`in`/`collectionFormat` handling.
fn convert_header(header: Value) -> Result<Value, SpecError> {
    let obj = match header {
        Value::Object(obj) => obj,
        _ => return Err(SpecError::Conversion("header must be an object".into())),
    };

    let mut out = Map::new();
    let mut schema = Map::new();
    for (key, value) in obj {
        if key == "collectionFormat" {
            continue;
        }
        if SCHEMA_KEYWORDS.contains(&key.as_str()) {
            schema.insert(key, value);
        } else {
            out.insert(key, value);
        }
    }
    if !schema.is_empty() {
        out.insert("schema".to_string(), Value::Object(schema));
    }
    Ok(Value::Object(out))
}

/// Convert a `securityDefinitions` entry to an OpenAPI 3 security scheme.
fn convert_security_scheme(definition: Value) -> Result<Value, SpecError> {
    let mut obj = match definition {
        Value::Object(obj) => obj,
        _ => {
            return Err(SpecError::Conversion(
                "security definition must be an object".into(),
            ))
        }
    };

    let scheme_type = obj
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    match scheme_type.as_str() {
        "basic" => {
            let mut out = Map::new();
            out.insert("type".to_string(), json!("http"));
            out.insert("scheme".to_string(), json!("basic"));
            if let Some(description) = obj.get("description") {
                out.insert("description".to_string(), description.clone());
            }
            Ok(Value::Object(out))
        }
        "apiKey" => Ok(Value::Object(obj)),
        "oauth2" => {
            let flow = obj
                .remove("flow")
                .and_then(|v| v.as_str().map(str::to_string))
                .ok_or_else(|| SpecError::Conversion("oauth2 scheme missing 'flow'".into()))?;
            let authorization_url = obj.remove("authorizationUrl");
            let token_url = obj.remove("tokenUrl");
            let scopes = obj.remove("scopes").unwrap_or_else(|| json!({}));

            let flow_name = match flow.as_str() {
                "implicit" => "implicit",
                "password" => "password",
                "application" => "clientCredentials",
                "accessCode" => "authorizationCode",
                other => {
                    return Err(SpecError::Conversion(format!(
                        "unknown oauth2 flow '{other}'"
                    )))
                }
            };

            let mut flow_obj = Map::new();
            if matches!(flow_name, "implicit" | "authorizationCode") {
                if let Some(url) = authorization_url {
                    flow_obj.insert("authorizationUrl".to_string(), url);
                }
            }
            if matches!(flow_name, "password" | "clientCredentials" | "authorizationCode") {
                if let Some(url) = token_url {
                    flow_obj.insert("tokenUrl".to_string(), url);
                }
            }
            flow_obj.insert("scopes".to_string(), scopes);

            let mut out = Map::new();
            out.insert("type".to_string(), json!("oauth2"));
            out.insert(
                "flows".to_string(),
                json!({ flow_name: Value::Object(flow_obj) }),
            );
            if let Some(description) = obj.get("description") {
                out.insert("description".to_string(), description.clone());
            }
            Ok(Value::Object(out))
        }
        other => Err(SpecError::Conversion(format!(
            "unknown security scheme type '{other}'"
        ))),
    }
}

/// Rewrite Swagger 2 `$ref` targets to their OpenAPI 3 component paths,
/// recursively through the whole tree.
pub(crate) fn rewrite_refs(value: Value) -> Value {
    match value {
        Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(key, value)| {
                    if key == "$ref" {
                        if let Value::String(target) = &value {
                            for (from, to) in REF_REWRITES {
                                if let Some(rest) = target.strip_prefix(from) {
                                    return (key, Value::String(format!("{to}{rest}")));
                                }
                            }
                        }
                        (key, value)
                    } else {
                        (key, rewrite_refs(value))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(rewrite_refs).collect()),
        other => other,
    }
}

/// Media types to expand a body or response schema into, defaulting to
/// JSON when the document declares none.
fn effective_media_types(declared: &[String]) -> Vec<String> {
    if declared.is_empty() {
        vec!["application/json".to_string()]
    } else {
        declared.to_vec()
    }
}

fn take_string_array(obj: &mut Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let Value::Array(items) = obj.remove(key)? else {
        return None;
    };
    Some(
        items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    )
}

fn with_context(error: SpecError, context: &str) -> SpecError {
    match error {
        SpecError::Conversion(message) => SpecError::Conversion(format!("{context}: {message}")),
        other => other,
    }
}
