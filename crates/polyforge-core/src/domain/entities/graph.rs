use std::collections::{HashMap, HashSet};

use super::common::validate_name;
use super::node::{Edge, Node};
use crate::domain::DomainError;

/// Ordered nodes plus the edges between them.
///
/// Node order is generation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl ProjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.node(&node.id).is_some()
    }

    /// Check graph-level invariants.
    ///
    /// - node ids are non-empty and unique
    /// - node directory names are valid and unique
    /// - both endpoints of every edge exist
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut ids = HashSet::new();
        let mut directories: HashMap<&str, &str> = HashMap::new();

        for node in &self.nodes {
            if node.id.trim().is_empty() {
                return Err(DomainError::MissingRequiredField { field: "node.id" });
            }
            if !ids.insert(node.id.as_str()) {
                return Err(DomainError::DuplicateNode {
                    id: node.id.clone(),
                });
            }

            let name = node.name();
            validate_name("node", name)?;
            if let Some(first) = directories.insert(name, &node.id) {
                return Err(DomainError::DuplicateNodeDirectory {
                    name: name.to_string(),
                    first: first.to_string(),
                    second: node.id.clone(),
                });
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.src, &edge.dest] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(DomainError::DanglingEdge {
                        edge: edge.id.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
