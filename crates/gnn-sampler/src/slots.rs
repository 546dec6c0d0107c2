// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Feature-slot allocation and context copy.

use std::collections::BTreeMap;

use gnn_record::{Feature, Features, Record};
use gnn_schema::{FeatureSpec, GraphSchema};
use tracing::debug;

use crate::config::FieldNames;
use crate::error::{kind_mismatch, EncodeError, SetKind};

/// One declared feature and the output field it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slot {
    /// Feature name as found in entity feature maps.
    pub(crate) feature: String,
    /// Namespaced output field name.
    pub(crate) field: String,
}

/// Declared endpoint node sets of an edge set; `None` accepts any set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Endpoints {
    pub(crate) source: Option<String>,
    pub(crate) target: Option<String>,
}

/// Slots for every declared node set and edge set.
#[derive(Debug, Default)]
pub(crate) struct SlotTable {
    pub(crate) node_sets: BTreeMap<String, Vec<Slot>>,
    pub(crate) edge_sets: BTreeMap<String, Vec<Slot>>,
    pub(crate) endpoints: BTreeMap<String, Endpoints>,
}

impl SlotTable {
    pub(crate) fn node_set(&self, name: &str) -> Option<&[Slot]> {
        self.node_sets.get(name).map(Vec::as_slice)
    }

    pub(crate) fn edge_set(&self, name: &str) -> Option<&[Slot]> {
        self.edge_sets.get(name).map(Vec::as_slice)
    }

    pub(crate) fn endpoints(&self, edge_set: &str) -> Option<&Endpoints> {
        self.endpoints.get(edge_set)
    }

    pub(crate) fn len(&self) -> usize {
        self.node_sets.values().chain(self.edge_sets.values()).map(Vec::len).sum()
    }
}

fn empty_slot(spec: &FeatureSpec) -> Feature {
    spec.dtype.map_or(Feature::Unset, Feature::with_kind)
}

/// Create an empty output field for every declared node and edge feature.
///
/// Fields exist in the record before any value is appended; a declared kind
/// types the field up front.
pub(crate) fn allocate(
    schema: &GraphSchema,
    names: &FieldNames,
    record: &mut Record,
) -> Result<SlotTable, EncodeError> {
    let mut table = SlotTable::default();
    for (set, spec) in &schema.node_sets {
        let mut slots = Vec::with_capacity(spec.features.len());
        for (feature, fspec) in &spec.features {
            if names.is_reserved(feature) {
                return Err(EncodeError::ReservedFeatureName {
                    kind: SetKind::Node,
                    set: set.clone(),
                    feature: feature.clone(),
                });
            }
            let field = names.node_feature(set, feature);
            record.insert(field.clone(), empty_slot(fspec));
            slots.push(Slot {
                feature: feature.clone(),
                field,
            });
        }
        table.node_sets.insert(set.clone(), slots);
    }
    for (set, spec) in &schema.edge_sets {
        let mut slots = Vec::with_capacity(spec.features.len());
        for (feature, fspec) in &spec.features {
            if names.is_reserved(feature) {
                return Err(EncodeError::ReservedFeatureName {
                    kind: SetKind::Edge,
                    set: set.clone(),
                    feature: feature.clone(),
                });
            }
            let field = names.edge_feature(set, feature);
            record.insert(field.clone(), empty_slot(fspec));
            slots.push(Slot {
                feature: feature.clone(),
                field,
            });
        }
        table.edge_sets.insert(set.clone(), slots);
        table.endpoints.insert(
            set.clone(),
            Endpoints {
                source: spec.source.clone(),
                target: spec.target.clone(),
            },
        );
    }
    debug!(
        node_sets = table.node_sets.len(),
        edge_sets = table.edge_sets.len(),
        slots = table.len(),
        "allocated feature slots"
    );
    Ok(table)
}

/// Copy declared context features present in `context` into `context/<name>`.
///
/// Absent context features are skipped; values are copied verbatim unless a
/// declared kind disagrees with them.
pub(crate) fn copy_context(
    schema: &GraphSchema,
    context: &Features,
    names: &FieldNames,
    record: &mut Record,
    sample: &str,
) -> Result<usize, EncodeError> {
    let mut copied = 0;
    for (name, spec) in &schema.context.features {
        let Some(value) = context.get(name) else {
            continue;
        };
        let field = names.context(name);
        let mut slot = empty_slot(spec);
        slot.merge_from(value)
            .map_err(|e| kind_mismatch(sample, &field, e))?;
        record.insert(field, slot);
        copied += 1;
    }
    Ok(copied)
}
