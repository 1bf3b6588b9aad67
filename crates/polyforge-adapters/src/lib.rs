//! Infrastructure adapters for Polyforge.
//!
//! This crate implements the ports defined in `polyforge-core::application::ports`
//! and owns every I/O concern: the local and in-memory filesystems, template
//! storage with the built-in catalog and on-disk overrides, the placeholder
//! renderer, and parsing of generation requests.

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod request;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use request::{RequestFormat, load_request, parse_request};
pub use template_loader::FilesystemTemplateLoader;
pub use template_store::InMemoryStore;
