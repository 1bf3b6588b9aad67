// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Polyforge.
//!
//! This module contains pure business logic: the project graph, the support
//! matrix, per-node context and the template model. All I/O, template
//! storage and rendering concerns are handled via ports (traits) defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable inputs**: A `Project` is never mutated during a run
//! - **Rich domain model**: Validation lives in entities, not services
//!
// Public API - what the world sees
pub mod capabilities;
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    common::{Permissions, RelativePath},
    context::NodeContext,
    graph::ProjectGraph,
    language_node::LanguageNode,
    node::{Edge, GrpcConfig, GrpcServer, Node, RestConfig, RestServer, WsConfig, WsServer},
    openapi::{ApiOperation, HttpMethod, OpenApiDocument},
    project::{ModificationDetails, Project, ProjectMetadata},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    template::{
        DirectorySpec, FileSpec, RenderContext, Template, TemplateBuilder, TemplateContent,
        TemplateId, TemplateMetadata, TemplateNode, TemplateSource, TemplateTree,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{Language, Protocol, ProtocolTemplate};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Template Tests
    // ========================================================================

    fn file(path: &str, content: &'static str) -> TemplateNode {
        TemplateNode::File(FileSpec::new(path, TemplateContent::parameterized(content)))
    }

    #[test]
    fn template_builder_success() {
        let template = Template::builder()
            .id(TemplateId::new("go/dockerfile", "1.0.0"))
            .metadata(TemplateMetadata::new("Go Dockerfile"))
            .add_node(file("Dockerfile", "FROM golang"))
            .build()
            .unwrap();

        assert_eq!(template.id.name(), "go/dockerfile");
        assert!(template.validate().is_ok());
    }

    #[test]
    fn template_builder_rejects_empty_tree() {
        let result = Template::builder()
            .id(TemplateId::new("test", "1.0.0"))
            .metadata(TemplateMetadata::new("Test"))
            .build();

        assert!(matches!(result, Err(DomainError::EmptyTemplate { .. })));
    }

    #[test]
    fn template_builder_requires_id() {
        let result = Template::builder()
            .metadata(TemplateMetadata::new("Test"))
            .add_node(file("a", "b"))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn template_validates_duplicate_paths() {
        let template = Template::builder()
            .id(TemplateId::new("test", "1.0.0"))
            .metadata(TemplateMetadata::new("Test"))
            .add_node(TemplateNode::Directory(DirectorySpec::new("src")))
            .add_node(TemplateNode::Directory(DirectorySpec::new("src")))
            .build()
            .unwrap();

        assert_eq!(
            template.validate().unwrap_err(),
            DomainError::DuplicatePath { path: "src".into() }
        );
    }

    #[test]
    fn template_id_parsing() {
        let id = TemplateId::parse("javascript/rest-openapi@2.0.0").unwrap();
        assert_eq!(id.name(), "javascript/rest-openapi");
        assert_eq!(id.version(), "2.0.0");
        assert_eq!(id.to_string(), "javascript/rest-openapi@2.0.0");

        assert!(TemplateId::parse("invalid").is_err());
        assert!(TemplateId::parse("too@many@ats").is_err());
        assert!(TemplateId::parse("@1.0.0").is_err());
    }

    #[test]
    #[should_panic]
    fn template_id_rejects_at_in_name() {
        TemplateId::new("invalid@name", "1.0.0");
    }

    // ========================================================================
    // Project Structure Tests
    // ========================================================================

    #[test]
    fn project_structure_builds_correctly() {
        let structure = ProjectStructure::new("/tmp/test")
            .with_directory("src")
            .with_file("src/main.rs", "fn main() {}");

        assert_eq!(structure.entry_count(), 2);
        assert_eq!(structure.file_count(), 1);
        assert_eq!(structure.directories().count(), 1);
        assert!(structure.validate().is_ok());
    }

    #[test]
    fn project_structure_validates_duplicates_and_empty() {
        let structure = ProjectStructure::new("/tmp/test")
            .with_file("main.rs", "")
            .with_file("main.rs", "");
        assert!(structure.validate().is_err());

        assert!(ProjectStructure::new("/tmp/test").validate().is_err());
    }

    // ========================================================================
    // Render Context Tests
    // ========================================================================

    #[test]
    fn render_context_name_variants() {
        let ctx = RenderContext::new("my awesome project").with_node_name("orderService");

        assert_eq!(ctx.get("PROJECT_NAME"), Some("my awesome project"));
        assert_eq!(ctx.get("PROJECT_NAME_SNAKE"), Some("my_awesome_project"));
        assert_eq!(ctx.get("PROJECT_NAME_KEBAB"), Some("my-awesome-project"));
        assert_eq!(ctx.get("PROJECT_NAME_PASCAL"), Some("MyAwesomeProject"));
        assert_eq!(ctx.get("NODE_NAME"), Some("orderService"));
        assert_eq!(ctx.get("NODE_NAME_KEBAB"), Some("order-service"));
    }

    #[test]
    fn render_context_renders_known_and_keeps_unknown() {
        let ctx = RenderContext::new("shop").with_variable("PORT", "8080");

        assert_eq!(
            ctx.render("{{PROJECT_NAME}}:{{PORT}} {{MISSING}} ${{ github.sha }}"),
            "shop:8080 {{MISSING}} ${{ github.sha }}"
        );
    }

    #[test]
    fn render_does_not_rescan_substituted_values() {
        let ctx = RenderContext::new("shop")
            .with_variable("ROUTES", "{{PORT}}")
            .with_variable("PORT", "1");

        assert_eq!(ctx.render("{{ROUTES}}/{{PORT}}"), "{{PORT}}/1");
    }

    #[test]
    fn render_copies_unterminated_placeholder() {
        let ctx = RenderContext::new("shop");
        assert_eq!(ctx.render("a {{PROJECT_NAME"), "a {{PROJECT_NAME");
    }
}
