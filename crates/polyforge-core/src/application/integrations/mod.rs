//! Integration copiers: the deployment artifacts every node gets regardless
//! of language.
//!
//! A copier is a stateless emitter for one artifact kind. The set is built
//! fresh for each node from its [`NodeContext`] and discarded after
//! [`IntegrationCopiers::run_all`].
//!
//! | Copier                | Template                        | Output                                          |
//! |-----------------------|---------------------------------|-------------------------------------------------|
//! | [`DockerCopier`]      | `<root>/dockerfile`             | `<node>/Dockerfile`                             |
//! | [`KubernetesCopier`]  | `<root>/kubernetes-{server,worker}` | `<node>/kubernetes/*.yaml`                  |
//! | [`GithubActionsCopier`] | `<root>/github-actions`       | `<project>/.github/workflows/<node>-container-image.yml` |
//! | [`DevspaceCopier`]    | `<root>/devspace-{server,worker}` | `<node>/devspace.yaml`, `<node>/devspace_start.sh` |

mod devspace;
mod docker;
mod github_actions;
mod kubernetes;
pub mod project;

use std::path::PathBuf;

use tracing::debug;

pub use devspace::DevspaceCopier;
pub use docker::DockerCopier;
pub use github_actions::GithubActionsCopier;
pub use kubernetes::KubernetesCopier;
pub use project::{DeepSourceCopier, ReadmeCopier};

use crate::application::ports::GenerationPorts;
use crate::domain::{NodeContext, RenderContext, entities::common::to_kebab_case};
use crate::error::ForgeResult;

/// Values shared by every integration copier of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopierParams {
    pub project_name: String,
    pub git_platform_user_name: String,
    pub git_repository_name: String,
    pub node_name: String,
    pub node_directory: PathBuf,
    pub project_directory: PathBuf,
    /// Namespace of the language's templates, e.g. `javascript`.
    pub template_root: String,
    pub is_rest_server: bool,
    pub port: Option<u16>,
}

impl CopierParams {
    /// Name of `artifact` in this language's template namespace.
    pub fn template_name(&self, artifact: &str) -> String {
        format!("{}/{}", self.template_root, artifact)
    }

    /// `<artifact>-server` for REST servers, `<artifact>-worker` otherwise.
    pub fn variant_template_name(&self, artifact: &str) -> String {
        let variant = if self.is_rest_server { "server" } else { "worker" };
        self.template_name(&format!("{artifact}-{variant}"))
    }

    /// Container image reference, lowercased as registries require.
    pub fn image(&self) -> String {
        format!(
            "ghcr.io/{}/{}/{}",
            self.git_platform_user_name.to_lowercase(),
            self.git_repository_name.to_lowercase(),
            to_kebab_case(&self.node_name)
        )
    }

    /// Variables every integration template may use.
    pub fn render_context(&self) -> RenderContext {
        let port = self.port.map(|p| p.to_string()).unwrap_or_default();
        let expose = match (self.is_rest_server, self.port) {
            (true, Some(port)) => format!("EXPOSE {port}"),
            _ => String::new(),
        };

        RenderContext::new(&self.project_name)
            .with_node_name(&self.node_name)
            .with_variable("GIT_PLATFORM_USER_NAME", &self.git_platform_user_name)
            .with_variable("GIT_REPOSITORY_NAME", &self.git_repository_name)
            .with_variable("IMAGE", self.image())
            .with_variable("PORT", port)
            .with_variable("EXPOSE", expose)
    }
}

/// Capability shared by all integration copiers.
pub trait IntegrationCopier {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Render and write this copier's artifact(s).
    fn create(&self, ports: &GenerationPorts<'_>) -> ForgeResult<()>;
}

/// The four per-node copiers, run in a fixed order.
#[derive(Debug, Clone)]
pub struct IntegrationCopiers {
    pub docker: DockerCopier,
    pub kubernetes: KubernetesCopier,
    pub github_actions: GithubActionsCopier,
    pub devspace: DevspaceCopier,
}

impl IntegrationCopiers {
    pub fn build(
        ctx: &NodeContext,
        template_root: &str,
        is_rest_server: bool,
        port: Option<u16>,
    ) -> Self {
        let params = CopierParams {
            project_name: ctx.project_name.clone(),
            git_platform_user_name: ctx.git_platform_user_name.clone(),
            git_repository_name: ctx.git_repository_name.clone(),
            node_name: ctx.node_name.clone(),
            node_directory: ctx.node_directory.clone(),
            project_directory: ctx.project_directory.clone(),
            template_root: template_root.to_string(),
            is_rest_server,
            port,
        };

        Self {
            docker: DockerCopier::new(params.clone()),
            kubernetes: KubernetesCopier::new(params.clone()),
            github_actions: GithubActionsCopier::new(params.clone()),
            devspace: DevspaceCopier::new(params),
        }
    }

    /// Container file, orchestration manifests, CI workflow, dev-loop config.
    pub fn in_order(&self) -> [&dyn IntegrationCopier; 4] {
        [
            &self.docker,
            &self.kubernetes,
            &self.github_actions,
            &self.devspace,
        ]
    }

    /// Run every copier; the first failure stops the rest.
    pub fn run_all(&self, ports: &GenerationPorts<'_>) -> ForgeResult<()> {
        for copier in self.in_order() {
            debug!(copier = copier.name(), "Running integration copier");
            copier.create(ports)?;
        }
        Ok(())
    }
}
