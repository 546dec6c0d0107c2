// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node identity → local index mapping.

use std::collections::HashMap;

use gnn_schema::{Node, NodeIdDisplay};
use tracing::{trace, warn};

use crate::config::DuplicateIdPolicy;
use crate::error::EncodeError;
use crate::to_i64;

/// Local indices of one subgraph's nodes, with the node set each index is
/// local to.
///
/// Borrowed from the subgraph and dropped at the end of the encode call.
#[derive(Debug)]
pub(crate) struct NodeIndex<'g> {
    by_id: HashMap<&'g [u8], (&'g str, i64)>,
}

impl<'g> NodeIndex<'g> {
    /// Group nodes by set (first-seen set order), number each group from zero
    /// in encounter order, then merge the groups into one identity map.
    pub(crate) fn build(
        nodes: &'g [Node],
        policy: DuplicateIdPolicy,
        sample: &str,
    ) -> Result<Self, EncodeError> {
        let mut order: Vec<&'g str> = Vec::new();
        let mut groups: HashMap<&'g str, Vec<&'g Node>> = HashMap::new();
        for node in nodes {
            let set = node.node_set_name.as_str();
            groups
                .entry(set)
                .or_insert_with(|| {
                    order.push(set);
                    Vec::new()
                })
                .push(node);
        }

        let mut by_id = HashMap::with_capacity(nodes.len());
        let mut owner = HashMap::with_capacity(nodes.len());
        for set in order {
            let members = groups.remove(set).unwrap_or_default();
            trace!(node_set = set, nodes = members.len(), "indexed node set");
            for (local, node) in members.into_iter().enumerate() {
                let id = node.id.as_slice();
                if let Some(first_set) = owner.insert(id, set) {
                    match policy {
                        DuplicateIdPolicy::Reject => {
                            return Err(EncodeError::DuplicateNodeId {
                                sample: sample.to_owned(),
                                node: NodeIdDisplay(id).to_string(),
                                first_set: first_set.to_owned(),
                                second_set: set.to_owned(),
                            });
                        }
                        DuplicateIdPolicy::LastWins => {
                            warn!(
                                sample,
                                node = %NodeIdDisplay(id),
                                first_set,
                                second_set = set,
                                "duplicate node identity; later mapping wins"
                            );
                        }
                    }
                }
                by_id.insert(id, (set, to_i64(local)));
            }
        }
        Ok(Self { by_id })
    }

    /// Node set and local index of `id`.
    pub(crate) fn resolve(&self, id: &[u8]) -> Option<(&'g str, i64)> {
        self.by_id.get(id).copied()
    }

    #[cfg(test)]
    pub(crate) fn local(&self, id: &[u8]) -> Option<i64> {
        self.resolve(id).map(|(_, local)| local)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }
}
