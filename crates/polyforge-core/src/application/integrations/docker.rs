use tracing::debug;

use super::{CopierParams, IntegrationCopier};
use crate::application::ports::GenerationPorts;
use crate::error::ForgeResult;

/// Writes `<node>/Dockerfile` from the language's `dockerfile` template.
#[derive(Debug, Clone)]
pub struct DockerCopier {
    params: CopierParams,
}

impl DockerCopier {
    pub fn new(params: CopierParams) -> Self {
        Self { params }
    }
}

impl IntegrationCopier for DockerCopier {
    fn name(&self) -> &'static str {
        "docker"
    }

    fn create(&self, ports: &GenerationPorts<'_>) -> ForgeResult<()> {
        let written = ports.render_template(
            &self.params.template_name("dockerfile"),
            &self.params.render_context(),
            &self.params.node_directory,
        )?;
        debug!(node = %self.params.node_name, written, "Dockerfile created");
        Ok(())
    }
}
