use thiserror::Error;

/// Unified error type for the entire pocketbook-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Note what is deliberately absent: there is no "not found" variant.
/// Updating or deleting a record by an unknown id is a normal, silently
/// ignored case (stale references from the presentation layer are common),
/// never an error.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Vault / File ────────────────────────────────────────────────
    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("Unsupported vault version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — wrong password or corrupted vault")]
    Decryption,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O ────────────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}
