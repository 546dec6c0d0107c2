// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Conversion of a sampled [`Subgraph`] into a flat graph-tensor [`Record`].
//!
//! The encoder runs strictly in sequence:
//!
//! 1. copy declared context features into `context/<name>`;
//! 2. allocate an empty field per declared node/edge feature;
//! 3. number nodes per node set (local indices, encounter order);
//! 4. walk nodes and their outgoing edges once, appending node features,
//!    edge `#source`/`#target` indices and edge features;
//! 5. emit `#size` fields and check each feature length is a multiple of its
//!    set's entity count;
//! 6. drop every field left without values.
//!
//! Ragged features (a value count that varies per entity, or a feature that
//! only some entities carry) are rejected, not encoded.
//!
//! ```
//! use gnn_record::{Feature, FeatureKind};
//! use gnn_sampler::encode_subgraph_to_record;
//! use gnn_schema::{Edge, FeatureSpec, GraphSchema, Node, Subgraph};
//!
//! let mut schema = GraphSchema::default();
//! schema.node_sets.entry("paper".into()).or_default()
//!     .features.insert("year".into(), FeatureSpec::of(FeatureKind::Int64));
//! schema.edge_sets.insert("cites".into(), Default::default());
//!
//! let subgraph = Subgraph {
//!     nodes: vec![
//!         Node::new(*b"A", "paper")
//!             .with_feature("year", Feature::ints([2001]))
//!             .with_edge(Edge::new(*b"B", "cites")),
//!         Node::new(*b"B", "paper").with_feature("year", Feature::ints([2020])),
//!     ],
//!     ..Subgraph::default()
//! };
//!
//! let record = encode_subgraph_to_record(&schema, &subgraph)?;
//! assert_eq!(record.get("nodes/paper.year"), Some(&Feature::ints([2001, 2020])));
//! assert_eq!(record.get("edges/cites.#source"), Some(&Feature::ints([0])));
//! assert_eq!(record.get("edges/cites.#target"), Some(&Feature::ints([1])));
//! # Ok::<(), gnn_sampler::EncodeError>(())
//! ```
#![forbid(unsafe_code)]

pub mod config;
mod encode;
mod error;
mod index;
mod slots;
mod validate;

pub use config::{DuplicateIdPolicy, EncoderConfig, FieldNames, SIZE_NAME, SOURCE_NAME, TARGET_NAME};
pub use error::{EdgeEnd, EncodeError, SetKind};

use gnn_record::{strip_empty_features, Record};
use gnn_schema::{GraphSchema, Subgraph};
use tracing::{debug, instrument};

use crate::encode::Accumulator;
use crate::index::NodeIndex;

/// Saturating `usize → i64` for values written into int64 lists.
pub(crate) fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Subgraph encoder.
///
/// Holds only configuration; every call to [`SubgraphEncoder::encode`] owns
/// its own accumulator, so one encoder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct SubgraphEncoder {
    config: EncoderConfig,
}

impl SubgraphEncoder {
    /// Create an encoder with the given configuration.
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode `subgraph` against `schema`.
    ///
    /// Pure function of its inputs: the same pair always yields the same
    /// record. On error nothing is returned.
    #[instrument(
        skip_all,
        fields(sample = subgraph.label(), nodes = subgraph.num_nodes(), edges = subgraph.num_edges())
    )]
    pub fn encode(&self, schema: &GraphSchema, subgraph: &Subgraph) -> Result<Record, EncodeError> {
        self.config.field_names.validate()?;
        schema.validate()?;
        let names = &self.config.field_names;
        let sample = subgraph.label();

        let mut record = Record::new();
        let context = slots::copy_context(schema, &subgraph.features, names, &mut record, sample)?;
        let slots = slots::allocate(schema, names, &mut record)?;

        let index = NodeIndex::build(&subgraph.nodes, self.config.duplicate_ids, sample)?;
        debug!(context, indexed = index.len(), "built node index");

        let mut acc = Accumulator::new(record, sample);
        encode::encode_graph(&mut acc, subgraph, &slots, &index, names)?;
        validate::emit_sizes(&mut acc, names)?;
        validate::check_cardinality(&acc, &slots)?;

        let mut record = acc.record;
        let pruned = strip_empty_features(&mut record);
        debug!(fields = record.len(), pruned, "encoded subgraph");
        Ok(record)
    }

    /// Encode and serialize to canonical CBOR bytes.
    pub fn encode_to_cbor(
        &self,
        schema: &GraphSchema,
        subgraph: &Subgraph,
    ) -> Result<Vec<u8>, EncodeError> {
        Ok(self.encode(schema, subgraph)?.to_cbor_bytes()?)
    }
}

/// Convert a subgraph to a flat record using the default configuration.
pub fn encode_subgraph_to_record(
    schema: &GraphSchema,
    subgraph: &Subgraph,
) -> Result<Record, EncodeError> {
    SubgraphEncoder::default().encode(schema, subgraph)
}
