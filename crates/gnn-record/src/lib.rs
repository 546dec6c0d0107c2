// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Flat typed feature records.
//!
//! A [`Record`] is a flat map from string field name to a [`Feature`], where a
//! feature is one of three typed value lists (float64, int64, bytes). This is
//! the shape consumed by columnar/tensor loaders: every graph piece (context,
//! node sets, edge sets, sizes, adjacency) is flattened into namespaced fields.
//!
//! # Determinism
//!
//! Fields are kept in a `BTreeMap`, so iteration order and the CBOR encoding
//! produced by [`Record::to_cbor_bytes`] depend only on content. Two equal
//! records always encode to identical bytes and share a [`Record::digest`].
#![forbid(unsafe_code)]

mod feature;
mod record;

pub use feature::{feature_length, feature_values, Feature, FeatureKind, FeatureValues, Features};
pub use record::{strip_empty_features, Hash32, Record};

use thiserror::Error;

/// Errors produced while building or transcoding records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Values of one kind were merged into a list of another kind.
    #[error("cannot merge {incoming} values into a {existing} list")]
    KindMismatch {
        /// Kind already held by the destination list.
        existing: FeatureKind,
        /// Kind of the values being appended.
        incoming: FeatureKind,
    },
    /// CBOR serialization failed.
    #[error("record encode failed: {0}")]
    Encode(String),
    /// CBOR deserialization failed.
    #[error("record decode failed: {0}")]
    Decode(String),
}
