// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Graph schema and sampled-subgraph model.
//!
//! - [`GraphSchema`] declares context features and, per node set and edge set,
//!   the feature names (and optionally kinds) that every entity must carry.
//! - [`Subgraph`] is a rooted sample of a larger graph: nodes with opaque byte
//!   identities, per-node features and explicit outgoing edges.
//!
//! Both are pure data with serde derives; neither is mutated by the encoder.
#![forbid(unsafe_code)]

mod schema;
mod subgraph;

pub use schema::{ContextSpec, EdgeSetSpec, FeatureSpec, GraphSchema, NodeSetSpec, SchemaError};
pub use subgraph::{Edge, Node, NodeIdDisplay, Subgraph};
