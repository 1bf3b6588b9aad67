//! Application layer for Polyforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`GenerationService`)
//! - **Generators**: One `LanguageGenerator` per supported language
//! - **Integrations**: Deployment artifacts every node gets (Docker,
//!   Kubernetes, CI, devspace) and the project-level README/DeepSource files
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod generators;
pub mod integrations;
pub mod ports;
pub mod services;

pub use services::{GenerationReport, GenerationService};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, GenerationPorts, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
