use std::path::{Path, PathBuf};

use super::node::Node;
use super::project::Project;
use crate::domain::DomainError;

/// Read-only values every generation stage of one node consumes.
///
/// Built once per node from the project and the node, then passed by
/// reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeContext {
    pub project_name: String,
    pub node_name: String,
    pub project_directory: PathBuf,
    pub node_directory: PathBuf,
    pub git_platform_user_name: String,
    pub git_repository_name: String,
}

impl NodeContext {
    /// Assemble the context for `node` under `<output_root>/<project>`.
    pub fn build(project: &Project, node: &Node, output_root: &Path) -> Result<Self, DomainError> {
        let project_directory = project_directory(output_root, project);
        let node_name = node.name().to_string();
        let git_platform_user_name = project
            .metadata
            .require_git_platform_user_name()?
            .to_string();

        Ok(Self {
            project_name: project.name.clone(),
            node_directory: project_directory.join(&node_name),
            node_name,
            project_directory,
            git_platform_user_name,
            git_repository_name: project.repository_name.clone(),
        })
    }
}

/// `<output_root>/<project name>`.
pub fn project_directory(output_root: &Path, project: &Project) -> PathBuf {
    output_root.join(&project.name)
}
