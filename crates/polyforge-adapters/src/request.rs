//! Generation request parsing.
//!
//! Converts the camelCase wire format (YAML or JSON) into a domain
//! [`Project`]. The graph may be given inline or as a serialized string, and
//! ports may be numbers or numeric strings.
//!
//! ```yaml
//! projectName: shop
//! repositoryName: shop
//! userName: octo
//! metadata:
//!   gitPlatformUserName: octo
//! graph:
//!   nodes:
//!     - id: svc1
//!       language: javascript
//!       restConfig:
//!         template: openapi
//!         server:
//!           port: 8080
//!           openApiYamlContent: "openapi: 3.0.0 ..."
//!   edges: []
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use polyforge_core::application::ApplicationError;
use polyforge_core::domain::{
    Edge, GrpcConfig, GrpcServer, Language, ModificationDetails, Node, Project, ProjectGraph,
    ProjectMetadata, ProtocolTemplate, RestConfig, RestServer, WsConfig, WsServer,
};
use polyforge_core::error::ForgeResult;

/// Serialization of a request document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Yaml,
    Json,
}

impl RequestFormat {
    /// Format implied by a file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationRequest {
    project_name: String,
    #[serde(default)]
    repository_name: Option<String>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    metadata: ProjectMetadata,
    graph: GraphField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GraphField {
    Inline(GraphDto),
    Serialized(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphDto {
    #[serde(default)]
    nodes: Vec<NodeDto>,
    #[serde(default)]
    edges: Vec<EdgeDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeDto {
    id: String,
    #[serde(default)]
    name: Option<String>,
    language: String,
    #[serde(default)]
    rest_config: Option<RestConfigDto>,
    #[serde(default)]
    grpc_config: Option<GrpcConfigDto>,
    #[serde(default)]
    ws_config: Option<WsConfigDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestConfigDto {
    template: String,
    #[serde(default)]
    server: Option<RestServerDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestServerDto {
    port: PortValue,
    #[serde(default, alias = "openApiFileYamlContent")]
    open_api_yaml_content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrpcConfigDto {
    #[serde(default = "builtin")]
    template: String,
    #[serde(default)]
    server: Option<GrpcServerDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrpcServerDto {
    port: PortValue,
    #[serde(default)]
    proto_content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WsConfigDto {
    #[serde(default = "builtin")]
    template: String,
    #[serde(default)]
    server: Option<WsServerDto>,
}

#[derive(Debug, Deserialize)]
struct WsServerDto {
    port: PortValue,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u16),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct EdgeDto {
    id: String,
    src: String,
    dest: String,
}

fn builtin() -> String {
    ProtocolTemplate::Builtin.as_str().to_string()
}

fn invalid(reason: impl Into<String>) -> ApplicationError {
    ApplicationError::InvalidRequest {
        reason: reason.into(),
    }
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Parse a request document into a [`Project`].
#[instrument(skip(input))]
pub fn parse_request(input: &str, format: RequestFormat) -> ForgeResult<Project> {
    let request: GenerationRequest = match format {
        RequestFormat::Json => serde_json::from_str(input).map_err(|e| invalid(e.to_string()))?,
        RequestFormat::Yaml => serde_yaml::from_str(input).map_err(|e| invalid(e.to_string()))?,
    };
    let project = request.into_project()?;

    debug!(
        project = %project.name,
        nodes = project.graph.nodes.len(),
        edges = project.graph.edges.len(),
        "Request parsed"
    );
    Ok(project)
}

/// Read and parse a request file; `.json` files are JSON, anything else YAML.
pub fn load_request(path: &Path) -> ForgeResult<Project> {
    let input = std::fs::read_to_string(path).map_err(|e| ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_request(&input, RequestFormat::from_path(path))
}

// ── Conversion ───────────────────────────────────────────────────────────────

impl GenerationRequest {
    fn into_project(self) -> ForgeResult<Project> {
        let graph = match self.graph {
            GraphField::Inline(graph) => graph,
            GraphField::Serialized(text) if text.trim().is_empty() => GraphDto::default(),
            // JSON is valid YAML
            GraphField::Serialized(text) => serde_yaml::from_str(&text)
                .map_err(|e| invalid(format!("graph: {e}")))?,
        };

        let mut project = Project::new(self.project_name, graph.into_graph()?)
            .with_metadata(self.metadata)
            .with_modification_details(ModificationDetails::now(
                self.user_name.unwrap_or_default(),
            ));
        if let Some(repository) = self.repository_name.filter(|r| !r.trim().is_empty()) {
            project = project.with_repository_name(repository);
        }
        Ok(project)
    }
}

impl GraphDto {
    fn into_graph(self) -> ForgeResult<ProjectGraph> {
        let nodes = self
            .nodes
            .into_iter()
            .map(NodeDto::into_node)
            .collect::<ForgeResult<Vec<_>>>()?;
        let edges = self
            .edges
            .into_iter()
            .map(|e| Edge::new(e.id, e.src, e.dest))
            .collect();
        Ok(ProjectGraph { nodes, edges })
    }
}

impl NodeDto {
    fn into_node(self) -> ForgeResult<Node> {
        let language: Language = self.language.parse()?;
        let mut node = Node::new(self.id, language);
        node.name = self.name;

        if let Some(rest) = self.rest_config {
            let server = match rest.server {
                Some(s) => Some(RestServer {
                    port: s.port.resolve("restConfig.server.port")?,
                    openapi_content: s.open_api_yaml_content.unwrap_or_default(),
                }),
                None => None,
            };
            node.rest_config = Some(RestConfig {
                template: rest.template.parse()?,
                server,
            });
        }

        if let Some(grpc) = self.grpc_config {
            let server = match grpc.server {
                Some(s) => Some(GrpcServer {
                    port: s.port.resolve("grpcConfig.server.port")?,
                    proto_content: s.proto_content,
                }),
                None => None,
            };
            node.grpc_config = Some(GrpcConfig {
                template: grpc.template.parse()?,
                server,
            });
        }

        if let Some(ws) = self.ws_config {
            let server = match ws.server {
                Some(s) => Some(WsServer {
                    port: s.port.resolve("wsConfig.server.port")?,
                }),
                None => None,
            };
            node.ws_config = Some(WsConfig {
                template: ws.template.parse()?,
                server,
            });
        }

        Ok(node)
    }
}

impl PortValue {
    fn resolve(self, field: &str) -> Result<u16, ApplicationError> {
        match self {
            Self::Number(port) => Ok(port),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| invalid(format!("{field}: '{text}' is not a valid port"))),
        }
    }
}
