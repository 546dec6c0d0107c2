// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Flat record of namespaced feature fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Feature, RecordError};

/// BLAKE3-256 digest of a record's canonical bytes.
pub type Hash32 = [u8; 32];

/// Flat map from field name to typed feature list.
///
/// Fields are sorted by name; the map is append-friendly through
/// [`Record::entry_mut`] and never reorders values within a field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Feature>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a field.
    pub fn insert(&mut self, name: impl Into<String>, feature: Feature) -> Option<Feature> {
        self.fields.insert(name.into(), feature)
    }

    /// Borrow a field by name.
    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.fields.get(name)
    }

    /// Mutably borrow a field by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Feature> {
        self.fields.get_mut(name)
    }

    /// Mutably borrow a field, creating an [`Feature::Unset`] slot when absent.
    pub fn entry_mut(&mut self, name: &str) -> &mut Feature {
        self.fields.entry(name.to_owned()).or_default()
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Feature> {
        self.fields.remove(name)
    }

    /// Returns `true` when the field exists (even if empty).
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Feature)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of values in a field; zero when the field is missing.
    pub fn feature_length(&self, name: &str) -> usize {
        self.fields.get(name).map_or(0, Feature::len)
    }

    /// Keep only the fields for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Feature) -> bool) {
        self.fields.retain(|k, v| keep(k, v));
    }

    /// Canonical CBOR encoding (fields in sorted order).
    pub fn to_cbor_bytes(&self) -> Result<Vec<u8>, RecordError> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(self, &mut bytes)
            .map_err(|e| RecordError::Encode(e.to_string()))?;
        Ok(bytes)
    }

    /// Decode a record from CBOR bytes.
    pub fn from_cbor_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        ciborium::de::from_reader(bytes).map_err(|e| RecordError::Decode(e.to_string()))
    }

    /// BLAKE3 hash of the canonical CBOR encoding.
    pub fn digest(&self) -> Result<Hash32, RecordError> {
        let bytes = self.to_cbor_bytes()?;
        Ok(*blake3::hash(&bytes).as_bytes())
    }
}

impl FromIterator<(String, Feature)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Feature)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Feature);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Remove every field with no values, whatever its kind. Mutates in place.
///
/// Returns the number of fields removed.
pub fn strip_empty_features(record: &mut Record) -> usize {
    let before = record.len();
    record.retain(|_, feature| !feature.is_empty());
    before - record.len()
}
