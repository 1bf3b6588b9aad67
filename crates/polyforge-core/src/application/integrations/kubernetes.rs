use tracing::debug;

use super::{CopierParams, IntegrationCopier};
use crate::application::ports::GenerationPorts;
use crate::error::ForgeResult;

/// Writes `<node>/kubernetes/deployment.yaml`, plus `service.yaml` for
/// REST servers (the `kubernetes-server` variant carries it).
#[derive(Debug, Clone)]
pub struct KubernetesCopier {
    params: CopierParams,
}

impl KubernetesCopier {
    pub fn new(params: CopierParams) -> Self {
        Self { params }
    }
}

impl IntegrationCopier for KubernetesCopier {
    fn name(&self) -> &'static str {
        "kubernetes"
    }

    fn create(&self, ports: &GenerationPorts<'_>) -> ForgeResult<()> {
        let written = ports.render_template(
            &self.params.variant_template_name("kubernetes"),
            &self.params.render_context(),
            &self.params.node_directory,
        )?;
        debug!(node = %self.params.node_name, written, "Kubernetes manifests created");
        Ok(())
    }
}
