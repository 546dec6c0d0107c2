// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Encode failures. All are fatal to one encode call; no partial record is
//! returned.

use std::fmt;

use gnn_record::{FeatureKind, RecordError};
use gnn_schema::SchemaError;
use thiserror::Error;

/// Which family of sets a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    /// A node set.
    Node,
    /// An edge set.
    Edge,
}

impl fmt::Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Node => "node",
            Self::Edge => "edge",
        })
    }
}

/// End of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    /// The node owning the edge.
    Source,
    /// The neighbor.
    Target,
}

impl fmt::Display for EdgeEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Target => "target",
        })
    }
}

/// Errors returned by the subgraph encoder.
///
/// `sample` is the subgraph's sample id (or `<unnamed>`); node identities are
/// rendered with [`gnn_schema::NodeIdDisplay`].
#[derive(Debug, Error)]
pub enum EncodeError {
    /// An edge points at an identity with no node in the subgraph.
    #[error("[{sample}] edge '{edge_set}' from {from_node} to node outside subgraph: {neighbor}")]
    DanglingEdge {
        /// Sample label.
        sample: String,
        /// Edge set of the offending edge.
        edge_set: String,
        /// Identity of the node owning the edge.
        from_node: String,
        /// Unresolved neighbor identity.
        neighbor: String,
    },
    /// An entity lacks a feature its set declares.
    #[error("[{sample}] feature '{feature}' of {kind} set '{set}' is missing from {entity}")]
    MissingFeature {
        /// Sample label.
        sample: String,
        /// Node or edge set.
        kind: SetKind,
        /// Set name.
        set: String,
        /// Declared feature name.
        feature: String,
        /// Description of the offending entity.
        entity: String,
    },
    /// Aggregated feature length is not a multiple of the set's entity count.
    #[error("[{sample}] invalid number ({length}) of values in '{field}' for {count} entities")]
    FeatureCardinality {
        /// Sample label.
        sample: String,
        /// Output field name.
        field: String,
        /// Total number of values emitted.
        length: usize,
        /// Entity count of the owning set.
        count: usize,
    },
    /// Values of one kind were supplied for a field holding another kind.
    #[error("[{sample}] field '{field}' holds {expected} values, got {found}")]
    FeatureKindMismatch {
        /// Sample label.
        sample: String,
        /// Output field name.
        field: String,
        /// Kind already fixed for the field.
        expected: FeatureKind,
        /// Kind supplied by the entity.
        found: FeatureKind,
    },
    /// A node names a node set the schema does not declare.
    #[error("[{sample}] node {node} belongs to undeclared node set '{node_set}'")]
    UnknownNodeSet {
        /// Sample label.
        sample: String,
        /// Undeclared set name.
        node_set: String,
        /// Node identity.
        node: String,
    },
    /// An edge names an edge set the schema does not declare.
    #[error("[{sample}] edge from {from_node} belongs to undeclared edge set '{edge_set}'")]
    UnknownEdgeSet {
        /// Sample label.
        sample: String,
        /// Undeclared set name.
        edge_set: String,
        /// Identity of the node owning the edge.
        from_node: String,
    },
    /// Two nodes share one identity (rejected under the default policy).
    #[error("[{sample}] duplicate node identity {node} {}", duplicate_location(.first_set, .second_set))]
    DuplicateNodeId {
        /// Sample label.
        sample: String,
        /// Duplicated identity.
        node: String,
        /// Set of the first occurrence.
        first_set: String,
        /// Set of the later occurrence.
        second_set: String,
    },
    /// An edge joins node sets other than the ones its edge set declares.
    #[error("[{sample}] edge '{edge_set}' {from_node} -> {neighbor}: {end} is in node set '{found}', declared '{expected}'")]
    EdgeEndpointMismatch {
        /// Sample label.
        sample: String,
        /// Edge set of the offending edge.
        edge_set: String,
        /// Identity of the node owning the edge.
        from_node: String,
        /// Target identity.
        neighbor: String,
        /// Which end disagrees.
        end: EdgeEnd,
        /// Node set declared for that end.
        expected: String,
        /// Node set the endpoint resolved to.
        found: String,
    },
    /// The configured size/source/target suffixes are unusable.
    #[error("invalid field names: {0}")]
    InvalidFieldNames(String),
    /// A declared feature name collides with a size/source/target field.
    #[error("{kind} set '{set}' declares reserved feature name '{feature}'")]
    ReservedFeatureName {
        /// Node or edge set.
        kind: SetKind,
        /// Set name.
        set: String,
        /// Colliding feature name.
        feature: String,
    },
    /// The schema failed validation.
    #[error("invalid schema: {0}")]
    InvalidSchema(#[from] SchemaError),
    /// The finished record could not be transcoded.
    #[error("record: {0}")]
    Record(#[from] RecordError),
}

fn duplicate_location(first_set: &str, second_set: &str) -> String {
    if first_set == second_set {
        format!("repeated within node set '{first_set}'")
    } else {
        format!("in node sets '{first_set}' and '{second_set}'")
    }
}

/// Map a merge failure onto the field being populated.
pub(crate) fn kind_mismatch(sample: &str, field: &str, err: RecordError) -> EncodeError {
    match err {
        RecordError::KindMismatch { existing, incoming } => EncodeError::FeatureKindMismatch {
            sample: sample.to_owned(),
            field: field.to_owned(),
            expected: existing,
            found: incoming,
        },
        other => EncodeError::Record(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicate(first_set: &str, second_set: &str) -> EncodeError {
        EncodeError::DuplicateNodeId {
            sample: "s".into(),
            node: "'x'".into(),
            first_set: first_set.into(),
            second_set: second_set.into(),
        }
    }

    #[test]
    fn duplicate_within_one_set_names_it_once() {
        assert_eq!(
            duplicate("paper", "paper").to_string(),
            "[s] duplicate node identity 'x' repeated within node set 'paper'"
        );
    }

    #[test]
    fn duplicate_across_sets_names_both() {
        assert_eq!(
            duplicate("paper", "author").to_string(),
            "[s] duplicate node identity 'x' in node sets 'paper' and 'author'"
        );
    }
}
