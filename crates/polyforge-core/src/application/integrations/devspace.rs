use tracing::debug;

use super::{CopierParams, IntegrationCopier};
use crate::application::ports::GenerationPorts;
use crate::error::ForgeResult;

/// Writes `<node>/devspace.yaml` and the executable `devspace_start.sh`.
#[derive(Debug, Clone)]
pub struct DevspaceCopier {
    params: CopierParams,
}

impl DevspaceCopier {
    pub fn new(params: CopierParams) -> Self {
        Self { params }
    }
}

impl IntegrationCopier for DevspaceCopier {
    fn name(&self) -> &'static str {
        "devspace"
    }

    fn create(&self, ports: &GenerationPorts<'_>) -> ForgeResult<()> {
        let written = ports.render_template(
            &self.params.variant_template_name("devspace"),
            &self.params.render_context(),
            &self.params.node_directory,
        )?;
        debug!(node = %self.params.node_name, written, "Devspace config created");
        Ok(())
    }
}
