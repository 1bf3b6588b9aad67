//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `polyforge-adapters` crate provides implementations.

use crate::application::ApplicationError;
use crate::domain::{ProjectStructure, RenderContext, Template, TemplateId, entities::template};
use crate::error::ForgeResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `polyforge_adapters::filesystem::LocalFilesystem` (production)
/// - `polyforge_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Set or clear the executable bit.
    fn set_permissions(&self, path: &Path, executable: bool) -> ForgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()>;
}

/// Port for template storage and retrieval.
///
/// Implemented by:
/// - `polyforge_adapters::template_store::InMemoryStore` (built-in catalog plus overrides)
pub trait TemplateStore: Send + Sync {
    /// Get a specific template by ID.
    fn get(&self, id: &TemplateId) -> ForgeResult<Template>;

    /// List all available templates.
    fn list(&self) -> ForgeResult<Vec<Template>>;

    /// Insert or replace a template.
    fn insert(&self, template: Template) -> ForgeResult<()>;

    /// Highest version of the template registered under `name`.
    fn resolve(&self, name: &str) -> ForgeResult<Template> {
        self.list()?
            .into_iter()
            .filter(|t| t.id.name() == name)
            .max_by(|a, b| template::compare_versions(a.id.version(), b.id.version()))
            .ok_or_else(|| {
                ApplicationError::TemplateResolution {
                    reason: format!("no template named '{name}'"),
                }
                .into()
            })
    }
}

/// Port for template rendering.
///
/// Implemented by:
/// - `polyforge_adapters::renderer::SimpleRenderer` (variable substitution)
pub trait TemplateRenderer: Send + Sync {
    /// Render a template into a structure rooted at `output_root`.
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> ForgeResult<ProjectStructure>;
}
