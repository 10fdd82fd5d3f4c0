//! Key-value persistence contract and the per-slice hydration protocol.

pub mod coordinator;
pub mod json_file;
pub mod slices;

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Blob storage the ledger persists into. Implementations own durability;
/// the ledger only decides what is written under which key.
pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn write(&self, key: &str, value: &[u8]) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).write(key, value)
    }
}

/// In-process store, used when embedding without durable storage and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

pub use coordinator::{PersistReport, PersistenceCoordinator};
pub use json_file::JsonFileStore;
pub use slices::Slice;
