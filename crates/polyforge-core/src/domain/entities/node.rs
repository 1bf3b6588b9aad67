//! Nodes and edges of a project graph.
//!
//! A [`Node`] is one service: a language plus at most one configuration per
//! protocol. Nodes are plain data; whether their configuration can be
//! generated is decided by `LanguageNode::resolve`.

use crate::domain::value_objects::{Language, Protocol, ProtocolTemplate};

/// One service in the project graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    /// Display and directory name. Falls back to `id` when absent.
    pub name: Option<String>,
    pub language: Language,
    pub rest_config: Option<RestConfig>,
    pub grpc_config: Option<GrpcConfig>,
    pub ws_config: Option<WsConfig>,
}

impl Node {
    pub fn new(id: impl Into<String>, language: Language) -> Self {
        Self {
            id: id.into(),
            name: None,
            language,
            rest_config: None,
            grpc_config: None,
            ws_config: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rest(mut self, config: RestConfig) -> Self {
        self.rest_config = Some(config);
        self
    }

    pub fn with_grpc(mut self, config: GrpcConfig) -> Self {
        self.grpc_config = Some(config);
        self
    }

    pub fn with_ws(mut self, config: WsConfig) -> Self {
        self.ws_config = Some(config);
        self
    }

    /// The node's name, used as its directory name.
    pub fn name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.id,
        }
    }

    /// Present protocol configs as `(protocol, template)` pairs, in
    /// validation order.
    pub fn protocol_templates(&self) -> Vec<(Protocol, ProtocolTemplate)> {
        let mut out = Vec::with_capacity(3);
        if let Some(rest) = &self.rest_config {
            out.push((Protocol::Rest, rest.template));
        }
        if let Some(grpc) = &self.grpc_config {
            out.push((Protocol::Grpc, grpc.template));
        }
        if let Some(ws) = &self.ws_config {
            out.push((Protocol::Ws, ws.template));
        }
        out
    }
}

// ── Protocol configs ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct RestConfig {
    pub template: ProtocolTemplate,
    /// Present when the node serves REST; absent for pure clients.
    pub server: Option<RestServer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestServer {
    pub port: u16,
    /// Literal OpenAPI document. Empty when not provided.
    pub openapi_content: String,
}

impl RestConfig {
    pub fn openapi_server(port: u16, openapi_content: impl Into<String>) -> Self {
        Self {
            template: ProtocolTemplate::OpenApi,
            server: Some(RestServer {
                port,
                openapi_content: openapi_content.into(),
            }),
        }
    }

    pub fn builtin_server(port: u16) -> Self {
        Self {
            template: ProtocolTemplate::Builtin,
            server: Some(RestServer {
                port,
                openapi_content: String::new(),
            }),
        }
    }

    pub fn client(template: ProtocolTemplate) -> Self {
        Self {
            template,
            server: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrpcConfig {
    pub template: ProtocolTemplate,
    pub server: Option<GrpcServer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrpcServer {
    pub port: u16,
    pub proto_content: Option<String>,
}

impl GrpcConfig {
    pub fn builtin_server(port: u16, proto_content: Option<String>) -> Self {
        Self {
            template: ProtocolTemplate::Builtin,
            server: Some(GrpcServer {
                port,
                proto_content,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WsConfig {
    pub template: ProtocolTemplate,
    pub server: Option<WsServer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WsServer {
    pub port: u16,
}

// ── Edges ────────────────────────────────────────────────────────────────────

/// Directed connection between two node ids. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: String,
    pub src: String,
    pub dest: String,
}

impl Edge {
    pub fn new(id: impl Into<String>, src: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            dest: dest.into(),
        }
    }
}
