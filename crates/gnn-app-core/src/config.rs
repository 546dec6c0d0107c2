// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port.
//!
//! Values are stored as JSON blobs under short logical keys (`"encoder"`,
//! ...). Keys are restricted to `[A-Za-z0-9_-]` so that adapters can map them
//! directly onto file names.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// Key contains characters outside `[A-Za-z0-9_-]` or is empty.
    #[error("invalid config key '{0}'")]
    InvalidKey(String),
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Check that `key` is a non-empty `[A-Za-z0-9_-]` identifier.
pub fn validate_key(key: &str) -> Result<(), ConfigError> {
    let ok = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidKey(key.to_owned()))
    }
}

/// Serializes config values as JSON and delegates storage to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize the value for `key`. Returns `Ok(None)` if missing
    /// or stored empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        validate_key(key)?;
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Load the value for `key`, falling back to `T::default()` when missing.
    pub fn load_or_default<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Serialize and persist the value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        validate_key(key)?;
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct CellStore(RefCell<HashMap<String, Vec<u8>>>);

    impl ConfigStore for CellStore {
        fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
            self.0.borrow().get(key).cloned().ok_or(ConfigError::NotFound)
        }

        fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
            self.0.borrow_mut().insert(key.to_owned(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn missing_and_empty_values_load_as_none() {
        let svc = ConfigService::new(CellStore::default());
        assert_eq!(svc.load::<u32>("absent").unwrap(), None);
        svc.store().save_raw("blank", b"").unwrap();
        assert_eq!(svc.load::<u32>("blank").unwrap(), None);
        assert_eq!(svc.load_or_default::<u32>("blank").unwrap(), 0);
    }

    #[test]
    fn save_then_load() {
        let svc = ConfigService::new(CellStore::default());
        svc.save("limits", &vec![1u8, 2, 3]).unwrap();
        assert_eq!(svc.load::<Vec<u8>>("limits").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn rejects_path_like_keys() {
        let svc = ConfigService::new(CellStore::default());
        assert!(matches!(
            svc.save("../etc", &1u8),
            Err(ConfigError::InvalidKey(_))
        ));
        assert!(matches!(svc.load::<u8>(""), Err(ConfigError::InvalidKey(_))));
    }

    #[test]
    fn corrupt_value_is_a_serde_error() {
        let svc = ConfigService::new(CellStore::default());
        svc.store().save_raw("bad", b"{").unwrap();
        assert!(matches!(svc.load::<u8>("bad"), Err(ConfigError::Serde(_))));
    }
}
