#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use once_cell::sync::Lazy;
use pocket_ledger::{
    config::ConfigManager,
    core::LedgerSession,
    domain::Transaction,
    errors::LedgerError,
    persistence::{KeyValueStore, MemoryStore},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated config manager backed by a unique directory.
pub fn setup_test_env() -> (ConfigManager, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    let manager = ConfigManager::with_base_dir(base.clone()).expect("create config manager");
    (manager, base)
}

/// A fully hydrated session over an in-memory store.
pub fn memory_session() -> (LedgerSession, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let session = LedgerSession::open(store.clone());
    (session, store)
}

pub fn expense(title: &str, amount: f64, date: &str, category: &str, account: &str) -> Transaction {
    Transaction::new(title, -amount.abs(), date, category, account)
}

/// Store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub failing: AtomicBool,
}

impl FlakyStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LedgerError::Storage(format!("refusing to write `{}`", key)));
        }
        self.inner.write(key, value)
    }
}
