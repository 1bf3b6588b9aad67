use super::node::{GrpcConfig, Node, RestConfig, WsConfig};
use super::project::Project;
use crate::domain::{
    DomainError, capabilities,
    value_objects::{Language, Protocol, ProtocolTemplate},
};

/// A node whose protocol configuration passed the support matrix.
///
/// Only `resolve` constructs one, so holding a `LanguageNode` means every
/// present config is generatable for its language.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageNode {
    id: String,
    name: String,
    language: Language,
    rest_config: Option<RestConfig>,
    grpc_config: Option<GrpcConfig>,
    ws_config: Option<WsConfig>,
}

impl LanguageNode {
    /// Validate `node` against its language's support matrix.
    ///
    /// Check order:
    /// 1. REST `openapi` server with an empty document (wins over everything)
    /// 2. REST, gRPC, WebSocket configs in turn: protocol, then template
    pub fn resolve(project: &Project, node: &Node) -> Result<Self, DomainError> {
        if !project.graph.contains(node) {
            return Err(DomainError::UnknownNode {
                id: node.id.clone(),
            });
        }

        let missing_openapi = node.rest_config.as_ref().is_some_and(|rest| {
            rest.template == ProtocolTemplate::OpenApi
                && rest
                    .server
                    .as_ref()
                    .is_some_and(|s| s.openapi_content.trim().is_empty())
        });
        if missing_openapi {
            return Err(DomainError::MissingOpenApiContent {
                node: node.name().to_string(),
            });
        }

        for (protocol, template) in node.protocol_templates() {
            capabilities::check_support(node.language, protocol, template)?;
        }

        Ok(Self {
            id: node.id.clone(),
            name: node.name().to_string(),
            language: node.language,
            rest_config: node.rest_config.clone(),
            grpc_config: node.grpc_config.clone(),
            ws_config: node.ws_config.clone(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn rest_config(&self) -> Option<&RestConfig> {
        self.rest_config.as_ref()
    }

    pub fn grpc_config(&self) -> Option<&GrpcConfig> {
        self.grpc_config.as_ref()
    }

    pub fn ws_config(&self) -> Option<&WsConfig> {
        self.ws_config.as_ref()
    }

    pub fn is_rest_server(&self) -> bool {
        self.rest_config.as_ref().is_some_and(|r| r.server.is_some())
    }

    pub fn rest_server_port(&self) -> Option<u16> {
        self.rest_config
            .as_ref()
            .and_then(|r| r.server.as_ref())
            .map(|s| s.port)
    }

    /// Protocols this node configures, in validation order.
    pub fn protocols(&self) -> Vec<Protocol> {
        let mut out = Vec::new();
        if self.rest_config.is_some() {
            out.push(Protocol::Rest);
        }
        if self.grpc_config.is_some() {
            out.push(Protocol::Grpc);
        }
        if self.ws_config.is_some() {
            out.push(Protocol::Ws);
        }
        out
    }

    /// First port this node serves on, REST before gRPC before WebSocket.
    pub fn primary_port(&self) -> Option<u16> {
        self.rest_server_port()
            .or_else(|| {
                self.grpc_config
                    .as_ref()
                    .and_then(|g| g.server.as_ref())
                    .map(|s| s.port)
            })
            .or_else(|| {
                self.ws_config
                    .as_ref()
                    .and_then(|w| w.server.as_ref())
                    .map(|s| s.port)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{graph::ProjectGraph, node::WsServer};

    fn project_with(node: &Node) -> Project {
        Project::new("shop", ProjectGraph::new().with_node(node.clone()))
    }

    fn resolve(node: Node) -> Result<LanguageNode, DomainError> {
        LanguageNode::resolve(&project_with(&node), &node)
    }

    #[test]
    fn supported_rest_openapi_server_resolves() {
        let node = Node::new("svc1", Language::JavaScript)
            .with_rest(RestConfig::openapi_server(8080, "openapi: 3.0.0"));
        let resolved = resolve(node).unwrap();

        assert!(resolved.is_rest_server());
        assert_eq!(resolved.rest_server_port(), Some(8080));
        assert_eq!(resolved.protocols(), vec![Protocol::Rest]);
    }

    #[test]
    fn empty_openapi_content_wins_over_every_other_check() {
        // gRPC would also be rejected for javascript, but content is checked first.
        let node = Node::new("svc1", Language::JavaScript)
            .with_rest(RestConfig::openapi_server(8080, "  \n"))
            .with_grpc(GrpcConfig::builtin_server(9090, None));

        assert_eq!(
            resolve(node).unwrap_err(),
            DomainError::MissingOpenApiContent {
                node: "svc1".into()
            }
        );
    }

    #[test]
    fn openapi_client_without_server_needs_no_content() {
        let node =
            Node::new("c", Language::Python).with_rest(RestConfig::client(ProtocolTemplate::OpenApi));
        assert!(resolve(node).is_ok());
    }

    #[test]
    fn grpc_on_javascript_names_protocol_and_language() {
        let node = Node::new("svc1", Language::JavaScript)
            .with_rest(RestConfig::openapi_server(8080, "openapi: 3.0.0"))
            .with_grpc(GrpcConfig::builtin_server(9090, None));

        let err = resolve(node).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnsupportedProtocol {
                protocol: Protocol::Grpc,
                language: Language::JavaScript
            }
        );
    }

    #[test]
    fn rest_is_checked_before_websocket() {
        let node = Node::new("svc", Language::Ruby)
            .with_rest(RestConfig::builtin_server(8080))
            .with_ws(WsConfig {
                template: ProtocolTemplate::Builtin,
                server: Some(WsServer { port: 7000 }),
            });

        assert!(matches!(
            resolve(node).unwrap_err(),
            DomainError::UnsupportedTemplate {
                protocol: Protocol::Rest,
                ..
            }
        ));
    }

    #[test]
    fn go_supports_grpc_builtin() {
        let node = Node::new("svc", Language::Go)
            .with_grpc(GrpcConfig::builtin_server(9090, Some("syntax = \"proto3\";".into())));
        let resolved = resolve(node).unwrap();

        assert!(!resolved.is_rest_server());
        assert_eq!(resolved.primary_port(), Some(9090));
    }

    #[test]
    fn node_outside_the_graph_is_rejected() {
        let project = Project::new("shop", ProjectGraph::new());
        let node = Node::new("stray", Language::Go);
        assert!(matches!(
            LanguageNode::resolve(&project, &node).unwrap_err(),
            DomainError::UnknownNode { .. }
        ));
    }
}
