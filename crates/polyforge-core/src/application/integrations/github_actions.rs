use tracing::debug;

use super::{CopierParams, IntegrationCopier};
use crate::application::ports::GenerationPorts;
use crate::error::ForgeResult;

/// Writes the node's container-image workflow.
///
/// Workflows live in the project root (`.github/workflows/`), so this is the
/// only per-node copier that renders relative to the project directory.
#[derive(Debug, Clone)]
pub struct GithubActionsCopier {
    params: CopierParams,
}

impl GithubActionsCopier {
    pub fn new(params: CopierParams) -> Self {
        Self { params }
    }
}

impl IntegrationCopier for GithubActionsCopier {
    fn name(&self) -> &'static str {
        "github-actions"
    }

    fn create(&self, ports: &GenerationPorts<'_>) -> ForgeResult<()> {
        let written = ports.render_template(
            &self.params.template_name("github-actions"),
            &self.params.render_context(),
            &self.params.project_directory,
        )?;
        debug!(node = %self.params.node_name, written, "Workflow created");
        Ok(())
    }
}
