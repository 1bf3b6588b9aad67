pub mod common;
pub mod context;
pub mod graph;
pub mod language_node;
pub mod node;
pub mod openapi;
pub mod project;
pub mod project_structure;
pub mod template;

pub use crate::domain::DomainError;
pub use context::NodeContext;
pub use graph::ProjectGraph;
pub use language_node::LanguageNode;
pub use node::{Edge, GrpcConfig, GrpcServer, Node, RestConfig, RestServer, WsConfig, WsServer};
pub use openapi::{ApiOperation, HttpMethod, OpenApiDocument};
pub use project::{ModificationDetails, Project, ProjectMetadata};
pub use project_structure::ProjectStructure;
pub use template::{RenderContext, Template};
