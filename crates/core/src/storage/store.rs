use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::CoreError;

/// The four persisted collections, one payload per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Expenses,
    Investments,
    Budgets,
    BudgetAlerts,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 4] = [
        CollectionKey::Expenses,
        CollectionKey::Investments,
        CollectionKey::Budgets,
        CollectionKey::BudgetAlerts,
    ];

    /// The stable string key a store files the payload under.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKey::Expenses => "expenses",
            CollectionKey::Investments => "investments",
            CollectionKey::Budgets => "budgets",
            CollectionKey::BudgetAlerts => "budgetAlerts",
        }
    }
}

impl std::fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable key-value persistence for record collections.
///
/// Implementations move opaque bytes only; what those bytes encode is
/// decided by [`load_collection`]/[`save_collection`]. Saves are assumed
/// synchronous and local — a failed save is reported, never retried here.
pub trait RecordStore {
    /// Read the raw payload for a collection. `None` means the key has
    /// never been saved, which callers treat as an empty collection.
    fn load_bytes(&self, key: CollectionKey) -> Result<Option<Vec<u8>>, CoreError>;

    /// Write the raw payload for a collection, replacing any previous one.
    fn save_bytes(&mut self, key: CollectionKey, bytes: &[u8]) -> Result<(), CoreError>;
}

/// Load a typed collection from a store. A never-saved key yields an
/// empty vector.
pub fn load_collection<T: DeserializeOwned>(
    store: &dyn RecordStore,
    key: CollectionKey,
) -> Result<Vec<T>, CoreError> {
    match store.load_bytes(key)? {
        Some(bytes) => serde_json::from_slice(&bytes)
            .map_err(|e| CoreError::Deserialization(format!("Failed to decode '{key}': {e}"))),
        None => Ok(Vec::new()),
    }
}

/// Encode a typed collection as JSON and hand it to the store.
pub fn save_collection<T: Serialize>(
    store: &mut dyn RecordStore,
    key: CollectionKey,
    records: &[T],
) -> Result<(), CoreError> {
    let bytes = serde_json::to_vec(records)
        .map_err(|e| CoreError::Serialization(format!("Failed to encode '{key}': {e}")))?;
    store.save_bytes(key, &bytes)
}
