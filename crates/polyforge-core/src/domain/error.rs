// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::{Language, Protocol, ProtocolTemplate};

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (a node failure is reported and also logged)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: String,
    },

    #[error("Duplicate node id '{id}' in project graph")]
    DuplicateNode { id: String },

    #[error("Nodes '{first}' and '{second}' both use the directory name '{name}'")]
    DuplicateNodeDirectory {
        name: String,
        first: String,
        second: String,
    },

    #[error("Edge '{edge}' references unknown node '{endpoint}'")]
    DanglingEdge { edge: String, endpoint: String },

    #[error("Node '{id}' is not part of the project graph")]
    UnknownNode { id: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template_id}' has no content")]
    EmptyTemplate { template_id: String },

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Compatibility Errors (409-level equivalent)
    // ========================================================================
    #[error("unsupported language '{language}'")]
    UnsupportedLanguage { language: String },

    #[error("unsupported protocol {protocol} for language {language}")]
    UnsupportedProtocol {
        protocol: Protocol,
        language: Language,
    },

    #[error("unsupported template {template} for protocol {protocol} in language {language}")]
    UnsupportedTemplate {
        protocol: Protocol,
        template: ProtocolTemplate,
        language: Language,
    },

    #[error("unknown protocol template '{template}'")]
    UnknownProtocolTemplate { template: String },

    // ========================================================================
    // Missing Content
    // ========================================================================
    #[error("Node '{node}' uses the openapi REST template but its OpenAPI document is empty")]
    MissingOpenApiContent { node: String },

    #[error("Invalid OpenAPI document: {reason}")]
    InvalidOpenApiDocument { reason: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { kind, .. } => vec![
                format!("A {kind} name may contain letters, digits, '-', '_' and '.'"),
                "It must not be empty, start with '.', or contain path separators".into(),
            ],
            Self::DuplicateNode { id } => vec![
                format!("Give every node a unique id (found '{id}' twice)"),
            ],
            Self::DuplicateNodeDirectory { .. } => vec![
                "Node names become directory names and must be unique".into(),
                "Set a distinct `name` on one of the nodes".into(),
            ],
            Self::DanglingEdge { endpoint, .. } => vec![
                format!("Add a node with id '{endpoint}' or remove the edge"),
            ],
            Self::UnsupportedLanguage { .. } => vec![
                "Supported languages: go, python, java, rust, javascript, typescript, ruby".into(),
                "Try: polyforge languages".into(),
            ],
            Self::UnsupportedProtocol { protocol, language } => vec![
                format!("{language} nodes cannot use {protocol} yet"),
                "Remove the config or pick a language that supports it".into(),
                "Try: polyforge languages".into(),
            ],
            Self::UnsupportedTemplate {
                protocol, language, ..
            } => vec![
                format!("Pick a {protocol} template supported by {language}"),
                "Try: polyforge languages".into(),
            ],
            Self::UnknownProtocolTemplate { .. } => {
                vec!["Valid templates are 'openapi' and 'builtin'".into()]
            }
            Self::MissingOpenApiContent { node } => vec![
                format!("Provide `openApiYamlContent` for node '{node}'"),
                "Or switch the REST template to 'builtin' (go only)".into(),
            ],
            Self::InvalidOpenApiDocument { .. } => vec![
                "The document must be an OpenAPI 3 or Swagger 2 YAML/JSON object".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Set '{field}' in the request metadata"),
                "Or configure a default under [git] in the config file".into(),
            ],
            Self::EmptyTemplate { template_id } => vec![
                format!("Template '{template_id}' is corrupted"),
                "Remove the override or restore the template files".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::DuplicateNode { .. }
            | Self::DuplicateNodeDirectory { .. }
            | Self::DanglingEdge { .. }
            | Self::UnknownNode { .. }
            | Self::MissingOpenApiContent { .. }
            | Self::InvalidOpenApiDocument { .. }
            | Self::MissingRequiredField { .. }
            | Self::UnknownProtocolTemplate { .. }
            | Self::InvalidTemplate(_) => ErrorCategory::Validation,
            Self::UnsupportedLanguage { .. }
            | Self::UnsupportedProtocol { .. }
            | Self::UnsupportedTemplate { .. } => ErrorCategory::Compatibility,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
