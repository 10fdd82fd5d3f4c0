use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, write_atomic};

use super::{KeyValueStore, Result};

const FILE_EXTENSION: &str = "json";

/// Filesystem-backed store keeping each key in its own JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), FILE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        write_atomic(&self.path_for(key), value)?;
        Ok(())
    }
}

/// Percent-encodes every byte outside `[A-Za-z0-9_-]`, so distinct keys
/// always map to distinct file names. The empty key becomes a bare `%`,
/// which no encoded key can produce.
fn canonical_key(key: &str) -> String {
    if key.is_empty() {
        return "%".into();
    }
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => encoded.push(char::from(byte)),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
