//! Preference persistence: keyed YAML values in a per-device data directory.
//!
//! Each key is stored independently as `<dir>/<key>.yaml`, wrapped in a
//! versioned envelope so the layout can evolve.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current schema version of persisted values.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from reading or writing persisted values.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid stored data: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u32),
}

/// A durable string store addressed by key.
pub trait KeyValueStore {
    /// Read a value. Missing keys are `Ok(None)`.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Remove a key. Removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Default data directory: `~/.lunchpick`.
pub fn default_data_dir() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".lunchpick");
    path
}

/// File-backed store: one YAML file per key inside a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.yaml"))
    }
}

impl KeyValueStore for DirStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store, used in tests and when no data directory is wanted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    value: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    value: T,
}

/// Serialize a value inside a versioned envelope.
pub fn encode<T: Serialize>(value: &T) -> Result<String, StoreError> {
    Ok(serde_yaml::to_string(&EnvelopeRef {
        version: SCHEMA_VERSION,
        value,
    })?)
}

/// Parse a versioned envelope, rejecting unknown schema versions.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, StoreError> {
    let envelope: Envelope<T> = serde_yaml::from_str(raw)?;
    if envelope.version != SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope.value)
}
