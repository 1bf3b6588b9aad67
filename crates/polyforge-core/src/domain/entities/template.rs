//! Template domain aggregate and variable rendering.
//!
//! Every artifact Polyforge writes (source scaffolding, Dockerfile, manifests,
//! CI workflow, dev-loop config, README) comes from a [`Template`]: an
//! identified, ordered tree of file and directory specs whose paths and
//! contents may contain `{{VARIABLE}}` placeholders.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Template (Aggregate Root)                                  │
//! │  ├── TemplateId         name@version, e.g. go/dockerfile@1.0.0
//! │  ├── TemplateMetadata   human-readable info                 │
//! │  └── TemplateTree       what to create                      │
//! │       └── Vec<TemplateNode>                                 │
//! │            ├── FileSpec (path, content, permissions)        │
//! │            └── DirectorySpec (path, permissions)            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RenderContext                                              │
//! │  └── {{NODE_NAME}} -> "orders", {{PORT}} -> "8080"          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Naming
//!
//! Template names are namespaced by the language's template root:
//! `javascript/rest-openapi`, `go/grpc-builtin`, `ruby/dockerfile`.
//! Project-wide templates live under `project/`.
//!
//! ## Literal vs Parameterized
//!
//! Literal content skips rendering entirely. Files that must contain `{{`
//! verbatim (Go templates, Helm charts) should be literal.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::domain::{
    entities::common::{Permissions, RelativePath, to_kebab_case, to_pascal_case, to_snake_case},
    error::DomainError,
};

// ============================================================================
// Render Context
// ============================================================================

/// Variables available to a template while it renders.
///
/// ## Standard Variables
///
/// - `PROJECT_NAME`, `PROJECT_NAME_SNAKE`, `PROJECT_NAME_KEBAB`, `PROJECT_NAME_PASCAL`
/// - `NODE_NAME` and the same three case variants, once `with_node_name` is called
///
/// Everything else (`PORT`, `ROUTES`, `GIT_PLATFORM_USER_NAME`, ...) is added
/// by the caller with `with_variable`.
///
/// No timestamps or random values are ever injected: rendering the same
/// template with the same context is byte-for-byte reproducible.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    /// Create a context with the project name and its case variants.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self::default().with_name_variants("PROJECT_NAME", &project_name.into())
    }

    /// Add `NODE_NAME` and its case variants.
    pub fn with_node_name(self, node_name: &str) -> Self {
        self.with_name_variants("NODE_NAME", node_name)
    }

    fn with_name_variants(mut self, prefix: &str, name: &str) -> Self {
        self.variables.insert(prefix.to_string(), name.to_string());
        self.variables
            .insert(format!("{prefix}_SNAKE"), to_snake_case(name));
        self.variables
            .insert(format!("{prefix}_KEBAB"), to_kebab_case(name));
        self.variables
            .insert(format!("{prefix}_PASCAL"), to_pascal_case(name));
        self
    }

    /// Add a variable. Later values override earlier ones.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{VARIABLE}}` placeholder in one left-to-right pass.
    ///
    /// # Edge Cases
    ///
    /// - `{{UNKNOWN}}` stays as literal `{{UNKNOWN}}`
    /// - substituted values are never re-scanned, so a value containing
    ///   `{{X}}` is inserted verbatim
    /// - an unterminated `{{` is copied through as-is
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                out.push_str(&rest[start..]);
                return out;
            };

            let key = &after[..end];
            match self.variables.get(key.trim()) {
                Some(value) if is_variable_name(key.trim()) => out.push_str(value),
                _ => {
                    out.push_str("{{");
                    out.push_str(key);
                    out.push_str("}}");
                }
            }
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        out
    }
}

fn is_variable_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

// ============================================================================
// Template Identity
// ============================================================================

/// Unique identifier for a template.
///
/// ## Format
///
/// Human-readable: `name@version` (e.g., `go/dockerfile@1.0.0`).
/// The name may contain `/` namespaces but never `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId {
    name: String,
    version: String,
}

impl TemplateId {
    /// Create a new template ID.
    ///
    /// # Panics
    ///
    /// Panics if name contains `@`. Use `parse` for untrusted input.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        let version = version.into();
        assert!(!name.contains('@'), "Template name cannot contain @: {name}");
        Self { name, version }
    }

    /// Parse from string format `name@version`.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.split('@').collect::<Vec<_>>().as_slice() {
            [name, version] if !name.is_empty() && !version.is_empty() => {
                Ok(Self::new(*name, *version))
            }
            _ => Err(DomainError::InvalidTemplate(format!(
                "Invalid template ID format: {s}. Expected 'name@version'"
            ))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Compare dotted versions numerically (`1.10.0` > `1.9.2`).
///
/// Non-numeric parts compare as text.
pub fn compare_versions(a: &str, b: &str) -> std::cmp::Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return std::cmp::Ordering::Equal,
            (Some(_), None) => return std::cmp::Ordering::Greater,
            (None, Some(_)) => return std::cmp::Ordering::Less,
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ord.is_ne() {
                    return ord;
                }
            }
        }
    }
}

// ============================================================================
// Core Template Aggregate
// ============================================================================

/// A reusable artifact blueprint.
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. `id.name` is non-empty
/// 2. `metadata.name` is non-empty
/// 3. `tree` is non-empty
/// 4. All paths in `tree` are unique
#[derive(Debug, Clone)]
pub struct Template {
    pub id: TemplateId,
    pub metadata: TemplateMetadata,
    pub tree: TemplateTree,
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.name().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Template name cannot be empty".into(),
            ));
        }

        if self.metadata.name.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Metadata name cannot be empty".into(),
            ));
        }

        if self.tree.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template_id: self.id.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for node in &self.tree.nodes {
            let path = node.path().as_str();
            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Builder for constructing templates.
///
/// `build()` requires `id` and `metadata` and a non-empty tree.
#[derive(Default)]
pub struct TemplateBuilder {
    id: Option<TemplateId>,
    metadata: Option<TemplateMetadata>,
    tree: TemplateTree,
}

impl TemplateBuilder {
    pub fn id(mut self, id: TemplateId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn metadata(mut self, metadata: TemplateMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn tree(mut self, tree: TemplateTree) -> Self {
        self.tree = tree;
        self
    }

    pub fn add_node(mut self, node: TemplateNode) -> Self {
        self.tree.push(node);
        self
    }

    pub fn build(self) -> Result<Template, DomainError> {
        let id = self.id.ok_or(DomainError::MissingRequiredField { field: "id" })?;
        let metadata = self
            .metadata
            .ok_or(DomainError::MissingRequiredField { field: "metadata" })?;

        if self.tree.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template_id: id.to_string(),
            });
        }

        Ok(Template {
            id,
            metadata,
            tree: self.tree,
        })
    }
}

/// Human-readable template information.
#[derive(Debug, Clone)]
pub struct TemplateMetadata {
    pub name: String,
    pub description: String,
    pub author: String,
    pub tags: Vec<String>,
}

impl TemplateMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            author: "Polyforge".to_string(),
            tags: Vec::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

// ============================================================================
// Template Tree
// ============================================================================

/// Ordered description of what a template creates.
#[derive(Debug, Clone, Default)]
pub struct TemplateTree {
    pub nodes: Vec<TemplateNode>,
}

impl TemplateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: TemplateNode) {
        self.nodes.push(node);
    }

    pub fn with_node(mut self, node: TemplateNode) -> Self {
        self.push(node);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone)]
pub enum TemplateNode {
    File(FileSpec),
    Directory(DirectorySpec),
}

impl TemplateNode {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

/// A file to create. Its path may itself contain placeholders.
#[derive(Debug, Clone)]
pub struct FileSpec {
    pub path: RelativePath,
    pub content: TemplateContent,
    pub permissions: Permissions,
}

impl FileSpec {
    pub fn new(path: impl Into<RelativePath>, content: TemplateContent) -> Self {
        Self {
            path: path.into(),
            content,
            permissions: Permissions::read_write(),
        }
    }

    /// Mark this file as executable (shell scripts).
    pub fn executable(mut self) -> Self {
        self.permissions = Permissions::executable();
        self
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySpec {
    pub path: RelativePath,
    pub permissions: Permissions,
}

impl DirectorySpec {
    pub fn new(path: impl Into<RelativePath>) -> Self {
        Self {
            path: path.into(),
            permissions: Permissions::read_write(),
        }
    }
}

// ============================================================================
// Content Types
// ============================================================================

#[derive(Debug, Clone)]
pub enum TemplateContent {
    /// Content used exactly as provided.
    Literal(TemplateSource),

    /// Content with `{{VARIABLE}}` placeholders to be substituted.
    Parameterized(TemplateSource),
}

impl TemplateContent {
    pub fn parameterized(source: impl Into<TemplateSource>) -> Self {
        Self::Parameterized(source.into())
    }

    pub fn literal(source: impl Into<TemplateSource>) -> Self {
        Self::Literal(source.into())
    }
}

/// Source of template content: compiled in or loaded at runtime.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    /// Quick heuristic used by loaders to pick `Parameterized` over `Literal`.
    pub fn contains_placeholder(&self) -> bool {
        self.as_str().contains("{{") && self.as_str().contains("}}")
    }
}
