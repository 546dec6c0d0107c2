// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed feature value lists.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RecordError;

/// Feature map keyed by feature name (node, edge or context features).
pub type Features = BTreeMap<String, Feature>;

/// Element type of a feature list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// 64-bit floating point values.
    Float,
    /// 64-bit signed integers.
    Int64,
    /// Opaque byte strings.
    Bytes,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Float => "float",
            Self::Int64 => "int64",
            Self::Bytes => "bytes",
        };
        f.write_str(name)
    }
}

/// A typed list of feature values.
///
/// Exactly one list kind is populated, or none at all ([`Feature::Unset`]).
/// An `Unset` feature adopts the kind of the first values merged into it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// No kind chosen yet; holds zero values.
    #[default]
    Unset,
    /// List of float64 values.
    FloatList(Vec<f64>),
    /// List of int64 values.
    Int64List(Vec<i64>),
    /// List of byte strings.
    BytesList(Vec<Vec<u8>>),
}

/// Borrowed view of a feature's values, regardless of type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValues<'a> {
    /// Float values.
    Float(&'a [f64]),
    /// Int64 values.
    Int64(&'a [i64]),
    /// Byte-string values.
    Bytes(&'a [Vec<u8>]),
}

impl FeatureValues<'_> {
    /// Number of elements in the view.
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Bytes(v) => v.len(),
        }
    }

    /// Returns `true` when the view holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Feature {
    /// Empty list of the given kind.
    pub fn with_kind(kind: FeatureKind) -> Self {
        match kind {
            FeatureKind::Float => Self::FloatList(Vec::new()),
            FeatureKind::Int64 => Self::Int64List(Vec::new()),
            FeatureKind::Bytes => Self::BytesList(Vec::new()),
        }
    }

    /// Convenience constructor for a float list.
    pub fn floats(values: impl Into<Vec<f64>>) -> Self {
        Self::FloatList(values.into())
    }

    /// Convenience constructor for an int64 list.
    pub fn ints(values: impl Into<Vec<i64>>) -> Self {
        Self::Int64List(values.into())
    }

    /// Convenience constructor for a bytes list.
    pub fn bytes<I, B>(values: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        Self::BytesList(values.into_iter().map(Into::into).collect())
    }

    /// Kind of the populated list, or `None` when unset.
    pub fn kind(&self) -> Option<FeatureKind> {
        match self {
            Self::Unset => None,
            Self::FloatList(_) => Some(FeatureKind::Float),
            Self::Int64List(_) => Some(FeatureKind::Int64),
            Self::BytesList(_) => Some(FeatureKind::Bytes),
        }
    }

    /// Borrowed values, or `None` when unset.
    pub fn values(&self) -> Option<FeatureValues<'_>> {
        match self {
            Self::Unset => None,
            Self::FloatList(v) => Some(FeatureValues::Float(v)),
            Self::Int64List(v) => Some(FeatureValues::Int64(v)),
            Self::BytesList(v) => Some(FeatureValues::Bytes(v)),
        }
    }

    /// Number of elements held.
    pub fn len(&self) -> usize {
        self.values().map_or(0, |v| v.len())
    }

    /// Returns `true` when no elements are held (including `Unset`).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a single int64 value, typing an unset list as int64.
    pub fn push_int64(&mut self, value: i64) -> Result<(), RecordError> {
        match self {
            Self::Unset => {
                *self = Self::Int64List(vec![value]);
                Ok(())
            }
            Self::Int64List(list) => {
                list.push(value);
                Ok(())
            }
            Self::FloatList(_) | Self::BytesList(_) => Err(RecordError::KindMismatch {
                existing: self.kind().unwrap_or(FeatureKind::Int64),
                incoming: FeatureKind::Int64,
            }),
        }
    }

    /// Append (concatenate) `other`'s values onto this list.
    ///
    /// An unset destination takes `other`'s kind; merging an unset `other` is a
    /// no-op. Mixing kinds fails and leaves `self` untouched.
    pub fn merge_from(&mut self, other: &Feature) -> Result<(), RecordError> {
        if matches!(other, Self::Unset) {
            return Ok(());
        }
        if matches!(self, Self::Unset) {
            *self = other.clone();
            return Ok(());
        }
        match (self, other) {
            (Self::FloatList(dst), Self::FloatList(src)) => {
                dst.extend_from_slice(src);
                Ok(())
            }
            (Self::Int64List(dst), Self::Int64List(src)) => {
                dst.extend_from_slice(src);
                Ok(())
            }
            (Self::BytesList(dst), Self::BytesList(src)) => {
                dst.extend(src.iter().cloned());
                Ok(())
            }
            (dst, src) => Err(RecordError::KindMismatch {
                existing: dst.kind().unwrap_or(FeatureKind::Bytes),
                incoming: src.kind().unwrap_or(FeatureKind::Bytes),
            }),
        }
    }
}

/// Return the values of a feature, regardless of type.
pub fn feature_values(feature: &Feature) -> Option<FeatureValues<'_>> {
    feature.values()
}

/// Return the number of elements in a feature.
pub fn feature_length(feature: &Feature) -> usize {
    feature.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_adopts_kind_of_first_merge() {
        let mut slot = Feature::Unset;
        slot.merge_from(&Feature::ints([1, 2])).unwrap();
        slot.merge_from(&Feature::ints([3])).unwrap();
        assert_eq!(slot, Feature::ints([1, 2, 3]));
        assert_eq!(slot.kind(), Some(FeatureKind::Int64));
    }

    #[test]
    fn merging_unset_is_noop() {
        let mut slot = Feature::floats([0.5]);
        slot.merge_from(&Feature::Unset).unwrap();
        assert_eq!(slot.len(), 1);
    }

    #[test]
    fn kind_mismatch_leaves_destination_untouched() {
        let mut slot = Feature::floats([1.0]);
        let err = slot.merge_from(&Feature::bytes([b"x".to_vec()])).unwrap_err();
        assert!(matches!(
            err,
            RecordError::KindMismatch {
                existing: FeatureKind::Float,
                incoming: FeatureKind::Bytes
            }
        ));
        assert_eq!(slot, Feature::floats([1.0]));
    }

    #[test]
    fn typed_empty_list_is_empty_but_has_kind() {
        let slot = Feature::with_kind(FeatureKind::Bytes);
        assert!(slot.is_empty());
        assert_eq!(slot.kind(), Some(FeatureKind::Bytes));
        assert_eq!(feature_length(&slot), 0);
        assert_eq!(feature_values(&Feature::Unset), None);
    }

    #[test]
    fn push_int64_rejects_float_list() {
        let mut slot = Feature::floats([1.0]);
        assert!(slot.push_int64(3).is_err());
        let mut slot = Feature::Unset;
        slot.push_int64(3).unwrap();
        slot.push_int64(4).unwrap();
        assert_eq!(slot, Feature::ints([3, 4]));
    }
}
