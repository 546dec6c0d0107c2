// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Size fields and the feature-cardinality check.

use tracing::trace;

use crate::config::FieldNames;
use crate::encode::Accumulator;
use crate::error::{kind_mismatch, EncodeError, SetKind};
use crate::slots::SlotTable;
use crate::to_i64;

/// Emit one scalar `#size` field per touched node set and edge set.
///
/// Untouched sets get no size field.
pub(crate) fn emit_sizes(acc: &mut Accumulator<'_>, names: &FieldNames) -> Result<(), EncodeError> {
    let node_sizes: Vec<(String, usize)> = acc
        .node_counts
        .iter()
        .map(|(set, n)| (names.node_size(set), *n))
        .collect();
    let edge_sizes: Vec<(String, usize)> = acc
        .edge_counts
        .iter()
        .map(|(set, n)| (names.edge_size(set), *n))
        .collect();
    for (field, count) in node_sizes.into_iter().chain(edge_sizes) {
        trace!(field = field.as_str(), count, "size");
        acc.record
            .entry_mut(&field)
            .push_int64(to_i64(count))
            .map_err(|e| kind_mismatch(acc.sample, &field, e))?;
    }
    Ok(())
}

/// Check that every feature field's length is a whole multiple of its set's
/// entity count. Sets with no entities are skipped.
pub(crate) fn check_cardinality(acc: &Accumulator<'_>, slots: &SlotTable) -> Result<(), EncodeError> {
    let node_fields = slots
        .node_sets
        .iter()
        .map(|(set, s)| (SetKind::Node, set, s));
    let edge_fields = slots
        .edge_sets
        .iter()
        .map(|(set, s)| (SetKind::Edge, set, s));
    for (kind, set, set_slots) in node_fields.chain(edge_fields) {
        let count = acc.count(kind, set);
        if count == 0 {
            continue;
        }
        for slot in set_slots {
            let length = acc.record.feature_length(&slot.field);
            if length % count != 0 {
                return Err(EncodeError::FeatureCardinality {
                    sample: acc.sample.to_owned(),
                    field: slot.field.clone(),
                    length,
                    count,
                });
            }
        }
    }
    Ok(())
}
