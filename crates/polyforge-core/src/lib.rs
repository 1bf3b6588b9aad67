//! Polyforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Polyforge, a
//! generator that turns a multi-service architecture graph into a project
//! tree: per-node source scaffolding, Dockerfile, Kubernetes manifests, CI
//! workflow and devspace config, plus a project README and DeepSource config.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          polyforge-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationService, LanguageGenerator, │
//! │        IntegrationCopiers)              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Store, Filesystem, Render)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    polyforge-adapters (Infrastructure)  │
//! │   (InMemoryStore, LocalFilesystem, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Project, Node, capabilities, Template)│
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use polyforge_core::{
//!     application::GenerationService,
//!     domain::{Language, Node, Project, ProjectGraph, ProjectMetadata, RestConfig},
//! };
//!
//! // 1. Describe the project
//! let project = Project::new(
//!     "shop",
//!     ProjectGraph::new().with_node(
//!         Node::new("svc1", Language::JavaScript)
//!             .with_rest(RestConfig::openapi_server(8080, openapi_yaml)),
//!     ),
//! )
//! .with_metadata(ProjectMetadata::default().with_git_platform_user_name("octo"));
//!
//! // 2. Use application service (with injected adapters)
//! let service = GenerationService::new(store, renderer, filesystem, "./out");
//! let report = service.generate(&project).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationReport, GenerationService,
        generators::{LanguageGenerator, generator_for},
        integrations::{IntegrationCopier, IntegrationCopiers},
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        Edge, Language, LanguageNode, Node, NodeContext, Project, ProjectGraph, ProjectMetadata,
        ProjectStructure, Protocol, ProtocolTemplate, RenderContext, RestConfig, Template,
        TemplateId, TemplateMetadata, capabilities,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
