//! Project-level copiers, run once after every node succeeded.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::debug;

use super::IntegrationCopier;
use crate::application::ports::GenerationPorts;
use crate::domain::{Node, Project, RenderContext, capabilities};
use crate::error::ForgeResult;

pub const README_TEMPLATE: &str = "project/readme";
pub const DEEPSOURCE_TEMPLATE: &str = "project/deepsource";

/// Writes `<project>/README.md` listing every node and edge.
#[derive(Debug, Clone)]
pub struct ReadmeCopier {
    project_directory: PathBuf,
    context: RenderContext,
}

impl ReadmeCopier {
    pub fn new(project: &Project, project_directory: PathBuf) -> Self {
        let context = RenderContext::new(&project.name)
            .with_variable("GIT_REPOSITORY_NAME", &project.repository_name)
            .with_variable(
                "GIT_PLATFORM_USER_NAME",
                project
                    .metadata
                    .git_platform_user_name
                    .clone()
                    .unwrap_or_default(),
            )
            .with_variable("NODE_COUNT", project.graph.nodes.len().to_string())
            .with_variable("NODE_TABLE", node_table(&project.graph.nodes))
            .with_variable("EDGE_LIST", edge_list(project));

        Self {
            project_directory,
            context,
        }
    }
}

fn node_table(nodes: &[Node]) -> String {
    let mut rows = vec![
        "| Node | Language | Protocols | Port |".to_string(),
        "|------|----------|-----------|------|".to_string(),
    ];
    for node in nodes {
        let protocols = node
            .protocol_templates()
            .iter()
            .map(|(p, t)| format!("{} ({t})", p.display_name()))
            .collect::<Vec<_>>();
        let port = [
            node.rest_config
                .as_ref()
                .and_then(|c| c.server.as_ref())
                .map(|s| s.port),
            node.grpc_config
                .as_ref()
                .and_then(|c| c.server.as_ref())
                .map(|s| s.port),
            node.ws_config
                .as_ref()
                .and_then(|c| c.server.as_ref())
                .map(|s| s.port),
        ]
        .into_iter()
        .flatten()
        .map(|p| p.to_string())
        .collect::<Vec<_>>();

        rows.push(format!(
            "| [{name}](./{name}) | {} | {} | {} |",
            node.language.display_name(),
            if protocols.is_empty() {
                "-".to_string()
            } else {
                protocols.join(", ")
            },
            if port.is_empty() {
                "-".to_string()
            } else {
                port.join(", ")
            },
            name = node.name(),
        ));
    }
    rows.join("\n")
}

fn edge_list(project: &Project) -> String {
    if project.graph.edges.is_empty() {
        return "_No connections between services._".to_string();
    }
    let name_of = |id: &str| {
        project
            .graph
            .node(id)
            .map_or_else(|| id.to_string(), |n| n.name().to_string())
    };
    project
        .graph
        .edges
        .iter()
        .map(|e| format!("- `{}` → `{}`", name_of(&e.src), name_of(&e.dest)))
        .collect::<Vec<_>>()
        .join("\n")
}

impl IntegrationCopier for ReadmeCopier {
    fn name(&self) -> &'static str {
        "readme"
    }

    fn create(&self, ports: &GenerationPorts<'_>) -> ForgeResult<()> {
        ports.render_template(README_TEMPLATE, &self.context, &self.project_directory)?;
        debug!("README created");
        Ok(())
    }
}

/// Writes `<project>/.deepsource.toml` with one analyzer per distinct
/// language in the graph.
#[derive(Debug, Clone)]
pub struct DeepSourceCopier {
    project_directory: PathBuf,
    context: RenderContext,
}

impl DeepSourceCopier {
    pub fn new(project: &Project, project_directory: PathBuf) -> Self {
        let analyzers = project
            .graph
            .nodes
            .iter()
            .map(|n| capabilities::analyzer(n.language))
            .collect::<BTreeSet<_>>();

        let blocks = analyzers
            .iter()
            .map(|a| format!("[[analyzers]]\nname = \"{a}\"\nenabled = true"))
            .collect::<Vec<_>>()
            .join("\n\n");

        Self {
            project_directory,
            context: RenderContext::new(&project.name).with_variable("ANALYZERS", blocks),
        }
    }

    #[cfg(test)]
    fn analyzers(&self) -> &str {
        self.context.get("ANALYZERS").unwrap_or_default()
    }
}

impl IntegrationCopier for DeepSourceCopier {
    fn name(&self) -> &'static str {
        "deepsource"
    }

    fn create(&self, ports: &GenerationPorts<'_>) -> ForgeResult<()> {
        ports.render_template(DEEPSOURCE_TEMPLATE, &self.context, &self.project_directory)?;
        debug!("DeepSource config created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Edge, Language, ProjectGraph, RestConfig};

    fn project() -> Project {
        Project::new(
            "shop",
            ProjectGraph::new()
                .with_node(
                    Node::new("n1", Language::TypeScript)
                        .with_name("web")
                        .with_rest(RestConfig::openapi_server(3000, "openapi: 3.0.0")),
                )
                .with_node(Node::new("n2", Language::JavaScript).with_name("worker"))
                .with_node(Node::new("n3", Language::Go).with_name("api"))
                .with_edge(Edge::new("e1", "n1", "n3")),
        )
    }

    #[test]
    fn readme_lists_nodes_and_edges_by_name() {
        let copier = ReadmeCopier::new(&project(), PathBuf::from("shop"));
        let table = copier.context.get("NODE_TABLE").unwrap();
        let edges = copier.context.get("EDGE_LIST").unwrap();

        assert!(table.contains("| [web](./web) | TypeScript | REST (openapi) | 3000 |"));
        assert!(table.contains("| [worker](./worker) | JavaScript | - | - |"));
        assert_eq!(edges, "- `web` → `api`");
    }

    #[test]
    fn deepsource_analyzers_are_sorted_and_deduplicated() {
        let copier = DeepSourceCopier::new(&project(), PathBuf::from("shop"));
        let analyzers = copier.analyzers();

        assert_eq!(analyzers.matches("name = \"javascript\"").count(), 1);
        let go = analyzers.find("\"go\"").unwrap();
        let js = analyzers.find("\"javascript\"").unwrap();
        assert!(go < js);
    }
}
