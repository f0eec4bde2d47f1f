use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use crate::error::DirectoryError;

/// String-keyed persistence substrate. The directory treats it as a
/// private mirror: full snapshots are rewritten under fixed keys after
/// every mutation and read back once at construction.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DirectoryError>;
    fn put(&self, key: &str, value: &[u8]) -> Result<(), DirectoryError>;
    fn remove(&self, key: &str) -> Result<(), DirectoryError>;
}

/// Durable substrate backed by a sled tree.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let db = sled::open(path)?;
        Ok(SledStore { db })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DirectoryError> {
        Ok(self.db.get(key.as_bytes())?.map(|ivec| ivec.to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), DirectoryError> {
        self.db.insert(key.as_bytes(), value)?;
        self.db.flush()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DirectoryError> {
        self.db.remove(key.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }
}

/// Ephemeral substrate; lives as long as the handle does. Used by tests
/// and by deployments that do not want anything written to disk.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DirectoryError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| DirectoryError::Database(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), DirectoryError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| DirectoryError::Database(e.to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DirectoryError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| DirectoryError::Database(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
