//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and print results. The
//! helpers here wire the adapters into a [`GenerationService`].

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod languages;
pub mod validate;

use std::path::{Path, PathBuf};

use tracing::debug;

use polyforge_adapters::{InMemoryStore, LocalFilesystem, SimpleRenderer, load_request};
use polyforge_core::application::GenerationService;
use polyforge_core::domain::{DomainValidator, Project};
use polyforge_core::error::ForgeError;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

const REQUEST_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Read a request file, fill missing git fields from config and check the
/// project and graph invariants.
pub(crate) fn load_project(path: &Path, config: &AppConfig) -> CliResult<Project> {
    if !path.is_file() {
        return Err(CliError::RequestNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if !REQUEST_EXTENSIONS
        .iter()
        .any(|ext| extension.eq_ignore_ascii_case(ext))
    {
        return Err(CliError::InvalidInput {
            message: format!(
                "'{}' is not a .yaml, .yml or .json request",
                path.display()
            ),
        });
    }

    let mut project = load_request(path)?;
    config.git.apply(&mut project.metadata);
    // The project name becomes a directory that `--force` and failure
    // cleanup may delete; reject it before anything touches the disk.
    DomainValidator::validate_project(&project).map_err(ForgeError::from)?;
    debug!(project = %project.name, nodes = project.graph.nodes.len(), "Request loaded");
    Ok(project)
}

/// Service over the built-in catalog (plus overrides) writing to disk.
pub(crate) fn build_service(config: &AppConfig, output_root: PathBuf) -> CliResult<GenerationService> {
    let store = InMemoryStore::with_builtin()?;
    if let Some(dir) = &config.templates.local_path {
        store.load_overrides(dir)?;
    }

    Ok(GenerationService::new(
        Box::new(store),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
        output_root,
    ))
}
