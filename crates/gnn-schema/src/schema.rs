// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Static graph schema declarations.

use std::collections::BTreeMap;

use gnn_record::FeatureKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// JSON parse failure.
    #[error("schema json: {0}")]
    Json(#[from] serde_json::Error),
    /// An edge set names an endpoint node set that is not declared.
    #[error("edge set '{edge_set}' references undeclared node set '{node_set}'")]
    UnknownEndpoint {
        /// Offending edge set.
        edge_set: String,
        /// Missing node set name.
        node_set: String,
    },
    /// A node or edge set name contains the `.` that separates set and
    /// feature in output field names.
    #[error("{what} name '{name}' contains '.'")]
    DottedSetName {
        /// Which kind of set.
        what: &'static str,
        /// Offending name.
        name: String,
    },
    /// A set or feature name is empty.
    #[error("empty {what} name")]
    EmptyName {
        /// Which kind of name was empty.
        what: &'static str,
    },
}

/// Declaration of one feature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSpec {
    /// Declared element kind; `None` leaves the kind to the data.
    pub dtype: Option<FeatureKind>,
    /// Free-form description.
    pub description: Option<String>,
}

impl FeatureSpec {
    /// Feature of a fixed kind.
    pub fn of(kind: FeatureKind) -> Self {
        Self {
            dtype: Some(kind),
            description: None,
        }
    }
}

/// Features attached to the whole graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSpec {
    /// Declared context features.
    pub features: BTreeMap<String, FeatureSpec>,
}

/// Declaration of a node set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSetSpec {
    /// Declared per-node features.
    pub features: BTreeMap<String, FeatureSpec>,
}

/// Declaration of an edge set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSetSpec {
    /// Node set of edge sources, when declared.
    pub source: Option<String>,
    /// Node set of edge targets, when declared.
    pub target: Option<String>,
    /// Declared per-edge features.
    pub features: BTreeMap<String, FeatureSpec>,
}

/// Graph schema: context features plus node and edge set declarations.
///
/// Sets and features are kept in sorted maps, so every accessor yields names
/// in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSchema {
    /// Context (graph-level) features.
    pub context: ContextSpec,
    /// Node sets keyed by name.
    pub node_sets: BTreeMap<String, NodeSetSpec>,
    /// Edge sets keyed by name.
    pub edge_sets: BTreeMap<String, EdgeSetSpec>,
}

impl GraphSchema {
    /// Parse a schema from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a schema from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, SchemaError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Declared context feature names.
    pub fn context_feature_names(&self) -> impl Iterator<Item = &str> {
        self.context.features.keys().map(String::as_str)
    }

    /// Node set declaration by name.
    pub fn node_set(&self, name: &str) -> Option<&NodeSetSpec> {
        self.node_sets.get(name)
    }

    /// Edge set declaration by name.
    pub fn edge_set(&self, name: &str) -> Option<&EdgeSetSpec> {
        self.edge_sets.get(name)
    }

    /// Declared feature names of a node set; `None` when the set is unknown.
    pub fn node_set_feature_names(&self, name: &str) -> Option<impl Iterator<Item = &str>> {
        self.node_set(name)
            .map(|spec| spec.features.keys().map(String::as_str))
    }

    /// Declared feature names of an edge set; `None` when the set is unknown.
    pub fn edge_set_feature_names(&self, name: &str) -> Option<impl Iterator<Item = &str>> {
        self.edge_set(name)
            .map(|spec| spec.features.keys().map(String::as_str))
    }

    /// Check structural consistency of the declarations: non-empty names,
    /// set names free of `.`, and declared edge endpoints.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let feature_maps = std::iter::once(&self.context.features)
            .chain(self.node_sets.values().map(|s| &s.features))
            .chain(self.edge_sets.values().map(|s| &s.features));
        for features in feature_maps {
            if features.keys().any(String::is_empty) {
                return Err(SchemaError::EmptyName { what: "feature" });
            }
        }
        for node_set in self.node_sets.keys() {
            check_set_name("node set", node_set)?;
        }
        for (edge_set, spec) in &self.edge_sets {
            check_set_name("edge set", edge_set)?;
            for endpoint in [&spec.source, &spec.target].into_iter().flatten() {
                if !self.node_sets.contains_key(endpoint) {
                    return Err(SchemaError::UnknownEndpoint {
                        edge_set: edge_set.clone(),
                        node_set: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn check_set_name(what: &'static str, name: &str) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::EmptyName { what });
    }
    if name.contains('.') {
        return Err(SchemaError::DottedSetName {
            what,
            name: name.to_owned(),
        });
    }
    Ok(())
}
