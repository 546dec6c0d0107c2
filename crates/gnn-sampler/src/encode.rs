// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single pass over nodes and their outgoing edges.
//!
//! Values are appended strictly in visiting order: node features in subgraph
//! node order, edge indices and edge features in (node order, outgoing-edge
//! order). Size and index fields line up positionally with feature fields on
//! the decoding side, so this order is part of the output contract.

use std::collections::BTreeMap;

use gnn_record::{Features, Record};
use gnn_schema::{Node, NodeIdDisplay, Subgraph};

use crate::config::FieldNames;
use crate::error::{kind_mismatch, EdgeEnd, EncodeError, SetKind};
use crate::index::NodeIndex;
use crate::slots::{Slot, SlotTable};

/// Mutable state of one encode call: the record under construction and the
/// running per-set entity counts.
#[derive(Debug)]
pub(crate) struct Accumulator<'g> {
    pub(crate) record: Record,
    pub(crate) node_counts: BTreeMap<&'g str, usize>,
    pub(crate) edge_counts: BTreeMap<&'g str, usize>,
    pub(crate) sample: &'g str,
}

impl<'g> Accumulator<'g> {
    pub(crate) fn new(record: Record, sample: &'g str) -> Self {
        Self {
            record,
            node_counts: BTreeMap::new(),
            edge_counts: BTreeMap::new(),
            sample,
        }
    }

    /// Entity count of a set; zero when untouched.
    pub(crate) fn count(&self, kind: SetKind, set: &str) -> usize {
        let counts = match kind {
            SetKind::Node => &self.node_counts,
            SetKind::Edge => &self.edge_counts,
        };
        counts.get(set).copied().unwrap_or(0)
    }

    /// Append every slot's value from `features`; a missing declared feature
    /// fails the encode.
    fn copy_features(
        &mut self,
        features: &Features,
        slots: &[Slot],
        kind: SetKind,
        set: &str,
        entity: impl FnOnce() -> String,
    ) -> Result<(), EncodeError> {
        for slot in slots {
            let Some(value) = features.get(&slot.feature) else {
                return Err(EncodeError::MissingFeature {
                    sample: self.sample.to_owned(),
                    kind,
                    set: set.to_owned(),
                    feature: slot.feature.clone(),
                    entity: entity(),
                });
            };
            self.record
                .entry_mut(&slot.field)
                .merge_from(value)
                .map_err(|e| kind_mismatch(self.sample, &slot.field, e))?;
        }
        Ok(())
    }

    fn push_index(&mut self, field: &str, value: i64) -> Result<(), EncodeError> {
        self.record
            .entry_mut(field)
            .push_int64(value)
            .map_err(|e| kind_mismatch(self.sample, field, e))
    }

    /// Encode one node: its features, then each outgoing edge.
    fn encode_node(
        &mut self,
        node: &'g Node,
        slots: &SlotTable,
        index: &NodeIndex<'g>,
        names: &FieldNames,
    ) -> Result<(), EncodeError> {
        let set = node.node_set_name.as_str();
        let Some(node_slots) = slots.node_set(set) else {
            return Err(EncodeError::UnknownNodeSet {
                sample: self.sample.to_owned(),
                node_set: set.to_owned(),
                node: NodeIdDisplay(&node.id).to_string(),
            });
        };
        *self.node_counts.entry(set).or_insert(0) += 1;
        self.copy_features(&node.features, node_slots, SetKind::Node, set, || {
            format!("node {}", NodeIdDisplay(&node.id))
        })?;

        let source = index.resolve(&node.id);
        for edge in &node.outgoing_edges {
            let edge_set = edge.edge_set_name.as_str();
            let Some(edge_slots) = slots.edge_set(edge_set) else {
                return Err(EncodeError::UnknownEdgeSet {
                    sample: self.sample.to_owned(),
                    edge_set: edge_set.to_owned(),
                    from_node: NodeIdDisplay(&node.id).to_string(),
                });
            };
            let (Some((source_set, source_idx)), Some((target_set, target_idx))) =
                (source, index.resolve(&edge.neighbor_id))
            else {
                return Err(EncodeError::DanglingEdge {
                    sample: self.sample.to_owned(),
                    edge_set: edge_set.to_owned(),
                    from_node: NodeIdDisplay(&node.id).to_string(),
                    neighbor: NodeIdDisplay(&edge.neighbor_id).to_string(),
                });
            };
            if let Some(declared) = slots.endpoints(edge_set) {
                for (end, expected, found) in [
                    (EdgeEnd::Source, &declared.source, source_set),
                    (EdgeEnd::Target, &declared.target, target_set),
                ] {
                    if let Some(expected) = expected.as_deref().filter(|e| *e != found) {
                        return Err(EncodeError::EdgeEndpointMismatch {
                            sample: self.sample.to_owned(),
                            edge_set: edge_set.to_owned(),
                            from_node: NodeIdDisplay(&node.id).to_string(),
                            neighbor: NodeIdDisplay(&edge.neighbor_id).to_string(),
                            end,
                            expected: expected.to_owned(),
                            found: found.to_owned(),
                        });
                    }
                }
            }

            self.push_index(&names.edge_source(edge_set), source_idx)?;
            self.push_index(&names.edge_target(edge_set), target_idx)?;
            *self.edge_counts.entry(edge_set).or_insert(0) += 1;

            self.copy_features(&edge.features, edge_slots, SetKind::Edge, edge_set, || {
                format!(
                    "edge {} -> {}",
                    NodeIdDisplay(&node.id),
                    NodeIdDisplay(&edge.neighbor_id)
                )
            })?;
        }
        Ok(())
    }
}

/// Run the graph encoder over every node of `subgraph`, in order.
pub(crate) fn encode_graph<'g>(
    acc: &mut Accumulator<'g>,
    subgraph: &'g Subgraph,
    slots: &SlotTable,
    index: &NodeIndex<'g>,
    names: &FieldNames,
) -> Result<(), EncodeError> {
    for node in &subgraph.nodes {
        acc.encode_node(node, slots, index, names)?;
    }
    Ok(())
}
