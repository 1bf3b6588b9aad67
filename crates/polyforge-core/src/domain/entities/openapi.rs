//! Minimal OpenAPI reader.
//!
//! Only what source scaffolding needs is extracted: the API title and
//! version, and one [`ApiOperation`] per `(path, method)`. The document is
//! otherwise written to disk untouched.

use std::fmt;

use serde_yaml::Value;

use super::common::to_camel_case;
use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "get" => Self::Get,
            "put" => Self::Put,
            "post" => Self::Post,
            "delete" => Self::Delete,
            "options" => Self::Options,
            "head" => Self::Head,
            "patch" => Self::Patch,
            "trace" => Self::Trace,
            _ => return None,
        })
    }

    pub fn upper(&self) -> String {
        self.as_str().to_ascii_uppercase()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation of the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOperation {
    pub method: HttpMethod,
    /// Path as written in the document, e.g. `/pets/{petId}`.
    pub path: String,
    /// `operationId`, or a camelCase name derived from method and path.
    pub handler: String,
    pub summary: Option<String>,
}

impl ApiOperation {
    /// Path with `{param}` segments rewritten as `:param`.
    pub fn colon_path(&self) -> String {
        self.path
            .split('/')
            .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(param) => format!(":{param}"),
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenApiDocument {
    pub title: String,
    pub version: String,
    /// Sorted by path, then method.
    pub operations: Vec<ApiOperation>,
}

impl OpenApiDocument {
    /// Parse an OpenAPI 3 / Swagger 2 document (YAML or JSON).
    pub fn parse(content: &str) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidOpenApiDocument { reason };

        let root: Value = serde_yaml::from_str(content).map_err(|e| invalid(e.to_string()))?;
        let Value::Mapping(root) = root else {
            return Err(invalid("document root must be a mapping".into()));
        };
        if !root.contains_key("openapi") && !root.contains_key("swagger") {
            return Err(invalid("missing `openapi` or `swagger` version field".into()));
        }

        let info = root.get("info");
        let title = info
            .and_then(|i| i.get("title"))
            .and_then(Value::as_str)
            .unwrap_or("API")
            .to_string();
        let version = info
            .and_then(|i| i.get("version"))
            .map(scalar_to_string)
            .unwrap_or_else(|| "0.0.0".to_string());

        let mut operations = Vec::new();
        match root.get("paths") {
            None | Some(Value::Null) => {}
            Some(Value::Mapping(paths)) => {
                for (path, item) in paths {
                    let Some(path) = path.as_str() else {
                        return Err(invalid("path keys must be strings".into()));
                    };
                    let Value::Mapping(item) = item else {
                        return Err(invalid(format!("path item '{path}' must be a mapping")));
                    };
                    for (key, operation) in item {
                        let Some(method) = key.as_str().and_then(HttpMethod::from_key) else {
                            continue;
                        };
                        operations.push(ApiOperation {
                            method,
                            path: path.to_string(),
                            handler: operation
                                .get("operationId")
                                .and_then(Value::as_str)
                                .filter(|s| !s.trim().is_empty())
                                .map(str::to_string)
                                .unwrap_or_else(|| derive_handler(method, path)),
                            summary: operation
                                .get("summary")
                                .and_then(Value::as_str)
                                .map(str::to_string),
                        });
                    }
                }
            }
            Some(_) => return Err(invalid("`paths` must be a mapping".into())),
        }

        operations.sort_by(|a, b| a.path.cmp(&b.path).then(a.method.cmp(&b.method)));

        Ok(Self {
            title,
            version,
            operations,
        })
    }
}

fn derive_handler(method: HttpMethod, path: &str) -> String {
    let name = to_camel_case(&format!("{method} {path}"));
    if name.is_empty() {
        method.as_str().to_string()
    } else {
        name
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => "0.0.0".to_string(),
    }
}
