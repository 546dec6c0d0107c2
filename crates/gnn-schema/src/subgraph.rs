// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sampled subgraph input model.

use std::fmt;

use gnn_record::{Feature, Features};
use serde::{Deserialize, Serialize};

use crate::SchemaError;

/// Outgoing edge of a [`Node`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Edge {
    /// Identity of the target node.
    pub neighbor_id: Vec<u8>,
    /// Edge set this edge belongs to.
    pub edge_set_name: String,
    /// Per-edge features.
    pub features: Features,
}

impl Edge {
    /// Edge to `neighbor_id` in `edge_set_name`, without features.
    pub fn new(neighbor_id: impl Into<Vec<u8>>, edge_set_name: impl Into<String>) -> Self {
        Self {
            neighbor_id: neighbor_id.into(),
            edge_set_name: edge_set_name.into(),
            features: Features::new(),
        }
    }

    /// Attach a feature value.
    pub fn with_feature(mut self, name: impl Into<String>, value: Feature) -> Self {
        self.features.insert(name.into(), value);
        self
    }
}

/// A sampled node.
///
/// `id` is opaque and must be unique within the enclosing [`Subgraph`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    /// Opaque node identity.
    pub id: Vec<u8>,
    /// Node set this node belongs to.
    pub node_set_name: String,
    /// Per-node features.
    pub features: Features,
    /// Outgoing edges in sampling order.
    pub outgoing_edges: Vec<Edge>,
}

impl Node {
    /// Node `id` in `node_set_name`, without features or edges.
    pub fn new(id: impl Into<Vec<u8>>, node_set_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_set_name: node_set_name.into(),
            features: Features::new(),
            outgoing_edges: Vec::new(),
        }
    }

    /// Attach a feature value.
    pub fn with_feature(mut self, name: impl Into<String>, value: Feature) -> Self {
        self.features.insert(name.into(), value);
        self
    }

    /// Append an outgoing edge.
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.outgoing_edges.push(edge);
        self
    }
}

/// A rooted sample of a larger graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subgraph {
    /// Identifier of this sample, used in diagnostics.
    pub sample_id: Option<String>,
    /// Identity of the seed node the sample was grown from.
    pub seed_node_id: Option<Vec<u8>>,
    /// Nodes in sampling order.
    pub nodes: Vec<Node>,
    /// Context (graph-level) features.
    pub features: Features,
}

impl Subgraph {
    /// Parse a subgraph from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a subgraph from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, SchemaError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of outgoing edges across all nodes.
    pub fn num_edges(&self) -> usize {
        self.nodes.iter().map(|n| n.outgoing_edges.len()).sum()
    }

    /// Short label for diagnostics: the sample id, or `"<unnamed>"`.
    pub fn label(&self) -> &str {
        self.sample_id.as_deref().unwrap_or("<unnamed>")
    }
}

/// Renders a node identity as text when printable UTF-8, otherwise as hex.
#[derive(Debug, Clone, Copy)]
pub struct NodeIdDisplay<'a>(pub &'a [u8]);

impl fmt::Display for NodeIdDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(self.0) {
            Ok(text) if !text.is_empty() && !text.chars().any(char::is_control) => {
                write!(f, "'{text}'")
            }
            _ => {
                f.write_str("0x")?;
                for byte in self.0 {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}
