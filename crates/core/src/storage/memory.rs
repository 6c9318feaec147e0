use std::collections::HashMap;

use crate::errors::CoreError;

use super::store::{CollectionKey, RecordStore};

/// In-memory record store. Used by tests and by embedders that handle
/// durability themselves; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: HashMap<CollectionKey, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn load_bytes(&self, key: CollectionKey) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.collections.get(&key).cloned())
    }

    fn save_bytes(&mut self, key: CollectionKey, bytes: &[u8]) -> Result<(), CoreError> {
        self.collections.insert(key, bytes.to_vec());
        Ok(())
    }
}
