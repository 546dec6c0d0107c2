// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Encoder configuration: output field naming and duplicate-identity policy.

use gnn_app_core::config::{ConfigError, ConfigService, ConfigStore};
use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// Suffix of per-set size fields expected by downstream graph tensor readers.
pub const SIZE_NAME: &str = "#size";
/// Suffix of per-edge-set source index fields.
pub const SOURCE_NAME: &str = "#source";
/// Suffix of per-edge-set target index fields.
pub const TARGET_NAME: &str = "#target";

/// Prefix of context fields.
pub const CONTEXT_PREFIX: &str = "context";
/// Prefix of node set fields.
pub const NODES_PREFIX: &str = "nodes";
/// Prefix of edge set fields.
pub const EDGES_PREFIX: &str = "edges";

/// Literal suffixes used for the size/source/target roles.
///
/// These must match what the reader of the produced records expects; they are
/// fixed per deployment and never negotiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// Size suffix (default `#size`).
    pub size: String,
    /// Source index suffix (default `#source`).
    pub source: String,
    /// Target index suffix (default `#target`).
    pub target: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            size: SIZE_NAME.to_owned(),
            source: SOURCE_NAME.to_owned(),
            target: TARGET_NAME.to_owned(),
        }
    }
}

impl FieldNames {
    /// `context/<feature>`
    pub fn context(&self, feature: &str) -> String {
        format!("{CONTEXT_PREFIX}/{feature}")
    }

    /// `nodes/<set>.<feature>`
    pub fn node_feature(&self, set: &str, feature: &str) -> String {
        format!("{NODES_PREFIX}/{set}.{feature}")
    }

    /// `edges/<set>.<feature>`
    pub fn edge_feature(&self, set: &str, feature: &str) -> String {
        format!("{EDGES_PREFIX}/{set}.{feature}")
    }

    /// `nodes/<set>.<size>`
    pub fn node_size(&self, set: &str) -> String {
        self.node_feature(set, &self.size)
    }

    /// `edges/<set>.<size>`
    pub fn edge_size(&self, set: &str) -> String {
        self.edge_feature(set, &self.size)
    }

    /// `edges/<set>.<source>`
    pub fn edge_source(&self, set: &str) -> String {
        self.edge_feature(set, &self.source)
    }

    /// `edges/<set>.<target>`
    pub fn edge_target(&self, set: &str) -> String {
        self.edge_feature(set, &self.target)
    }

    /// Reject empty suffixes and suffixes shared by two roles; either would
    /// interleave unrelated values in one field.
    pub fn validate(&self) -> Result<(), EncodeError> {
        let roles = [
            ("size", &self.size),
            ("source", &self.source),
            ("target", &self.target),
        ];
        for (i, (role, name)) in roles.iter().enumerate() {
            if name.is_empty() {
                return Err(EncodeError::InvalidFieldNames(format!("empty {role} suffix")));
            }
            if let Some((other, _)) = roles[i + 1..].iter().find(|(_, n)| n == name) {
                return Err(EncodeError::InvalidFieldNames(format!(
                    "{role} and {other} share suffix '{name}'"
                )));
            }
        }
        Ok(())
    }

    /// Returns `true` when `feature` would collide with a structural field.
    pub fn is_reserved(&self, feature: &str) -> bool {
        feature == self.size || feature == self.source || feature == self.target
    }
}

/// What to do when two subgraph nodes share one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateIdPolicy {
    /// Fail the encode with a duplicate-identity error.
    #[default]
    Reject,
    /// Keep the mapping assigned last (set groups in first-seen order, then
    /// encounter order within a set). Edges to the identity resolve to it.
    LastWins,
}

/// Encoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Structural field suffixes.
    pub field_names: FieldNames,
    /// Duplicate node identity handling.
    pub duplicate_ids: DuplicateIdPolicy,
}

impl EncoderConfig {
    /// Config key under which the encoder settings are stored.
    pub const KEY: &'static str = "encoder";

    /// Load from a config service; defaults when nothing is stored.
    pub fn load<S: ConfigStore>(service: &ConfigService<S>) -> Result<Self, ConfigError> {
        service.load_or_default(Self::KEY)
    }

    /// Persist through a config service.
    pub fn save<S: ConfigStore>(&self, service: &ConfigService<S>) -> Result<(), ConfigError> {
        service.save(Self::KEY, self)
    }
}
