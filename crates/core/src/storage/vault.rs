//! Encrypted single-file record store.
//!
//! All four collection payloads live in one `.pkbv` file. The plaintext
//! is a bincode-encoded map of collection key to raw payload bytes, so
//! the vault stays agnostic of how each collection is encoded.
//!
//! File layout:
//!
//! ```text
//! [PKBV: 4B] [version: 2B LE]
//! [memory_kib: 4B LE] [iterations: 4B LE] [lanes: 4B LE]
//! [salt: 16B] [nonce: 12B] [ciphertext_len: 8B LE]
//! [ciphertext: variable, AES-256-GCM with 16B auth tag appended]
//! ```
//!
//! The key is derived with Argon2id from the password and a fresh random
//! salt per save. The GCM auth tag covers integrity, so tampering and
//! wrong passwords both surface as `CoreError::Decryption`.

use std::collections::HashMap;
use std::path::PathBuf;

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::CoreError;

use super::store::{CollectionKey, RecordStore};

const MAGIC: &[u8; 4] = b"PKBV";
const VERSION: u16 = 1;

/// magic(4) + version(2) + kdf(12) + salt(16) + nonce(12) + len(8)
const HEADER_LEN: usize = 54;

/// Argon2id cost parameters, written into the header so they can be
/// raised in a future version without breaking old vaults.
#[derive(Debug, Clone, Copy)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub lanes: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65_536, // 64 MB
            iterations: 3,
            lanes: 4,
        }
    }
}

/// Password-encrypted file-backed record store.
///
/// Payloads are cached in memory; every save rewrites the whole file with
/// a fresh salt and nonce. Local personal-finance data is small, so the
/// rewrite is cheap and keeps the format free of any journal.
pub struct VaultStore {
    path: PathBuf,
    password: String,
    payloads: HashMap<String, Vec<u8>>,
}

impl std::fmt::Debug for VaultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never print the password
        f.debug_struct("VaultStore")
            .field("path", &self.path)
            .field("payloads", &self.payloads.len())
            .finish()
    }
}

impl VaultStore {
    /// Start an empty vault backed by `path`. Nothing touches the disk
    /// until the first save.
    pub fn create(path: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            password: password.into(),
            payloads: HashMap::new(),
        }
    }

    /// Open an existing vault file, decrypting it with `password`.
    pub fn open(path: impl Into<PathBuf>, password: impl Into<String>) -> Result<Self, CoreError> {
        let path = path.into();
        let password = password.into();
        let bytes = std::fs::read(&path)?;
        let payloads = decrypt_vault(&bytes, &password)?;
        Ok(Self {
            path,
            password,
            payloads,
        })
    }

    /// Re-encrypt the vault under a new password and rewrite the file.
    pub fn change_password(&mut self, new_password: impl Into<String>) -> Result<(), CoreError> {
        self.password = new_password.into();
        self.persist()
    }

    fn persist(&self) -> Result<(), CoreError> {
        let bytes = encrypt_vault(&self.payloads, &self.password)?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl RecordStore for VaultStore {
    fn load_bytes(&self, key: CollectionKey) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.payloads.get(key.as_str()).cloned())
    }

    fn save_bytes(&mut self, key: CollectionKey, bytes: &[u8]) -> Result<(), CoreError> {
        self.payloads.insert(key.as_str().to_string(), bytes.to_vec());
        self.persist()
    }
}

// ── Encryption & framing ────────────────────────────────────────────

fn encrypt_vault(
    payloads: &HashMap<String, Vec<u8>>,
    password: &str,
) -> Result<Vec<u8>, CoreError> {
    let plaintext = bincode::serialize(payloads)?;

    let salt = random_bytes::<16>()?;
    let nonce = random_bytes::<12>()?;
    let params = KdfParams::default();
    let key = derive_key(password, &salt, &params)?;

    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_slice())
        .map_err(|e| CoreError::Encryption(format!("Encryption failed: {e}")))?;

    let mut buf = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&VERSION.to_le_bytes());
    buf.extend_from_slice(&params.memory_kib.to_le_bytes());
    buf.extend_from_slice(&params.iterations.to_le_bytes());
    buf.extend_from_slice(&params.lanes.to_le_bytes());
    buf.extend_from_slice(&salt);
    buf.extend_from_slice(&nonce);
    buf.extend_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    buf.extend_from_slice(&ciphertext);
    Ok(buf)
}

fn decrypt_vault(data: &[u8], password: &str) -> Result<HashMap<String, Vec<u8>>, CoreError> {
    if data.len() < HEADER_LEN {
        return Err(CoreError::InvalidVaultFormat(
            "File too small to be a valid vault".into(),
        ));
    }
    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidVaultFormat(
            "Invalid magic bytes - not a vault file".into(),
        ));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version == 0 || version > VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let params = KdfParams {
        memory_kib: le_u32(data, 6),
        iterations: le_u32(data, 10),
        lanes: le_u32(data, 14),
    };
    // Bound the KDF cost so a crafted file cannot exhaust memory or CPU.
    if !(8..=1_048_576).contains(&params.memory_kib) {
        return Err(CoreError::InvalidVaultFormat(format!(
            "KDF memory cost out of safe range: {} KiB",
            params.memory_kib
        )));
    }
    if !(1..=20).contains(&params.iterations) {
        return Err(CoreError::InvalidVaultFormat(format!(
            "KDF iteration count out of safe range: {}",
            params.iterations
        )));
    }
    if !(1..=16).contains(&params.lanes) {
        return Err(CoreError::InvalidVaultFormat(format!(
            "KDF parallelism out of safe range: {}",
            params.lanes
        )));
    }

    let mut salt = [0u8; 16];
    salt.copy_from_slice(&data[18..34]);
    let mut nonce = [0u8; 12];
    nonce.copy_from_slice(&data[34..46]);

    let ciphertext_len = u64::from_le_bytes([
        data[46], data[47], data[48], data[49], data[50], data[51], data[52], data[53],
    ]) as usize;
    let body = &data[HEADER_LEN..];
    if body.len() < ciphertext_len {
        return Err(CoreError::InvalidVaultFormat(format!(
            "File truncated: expected {} bytes of ciphertext, got {}",
            ciphertext_len,
            body.len()
        )));
    }
    let ciphertext = &body[..ciphertext_len];

    let key = derive_key(password, &salt, &params)?;
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))?;
    // wrong password or tampered data both fail the auth tag here
    let plaintext = cipher.decrypt(Nonce::from_slice(&nonce), ciphertext)?;

    bincode::deserialize(&plaintext)
        .map_err(|e| CoreError::Deserialization(format!("Failed to decode vault payloads: {e}")))
}

/// Derive a 256-bit key from the password with Argon2id.
fn derive_key(password: &str, salt: &[u8; 16], params: &KdfParams) -> Result<[u8; 32], CoreError> {
    let argon2_params = Params::new(params.memory_kib, params.iterations, params.lanes, Some(32))
        .map_err(|e| CoreError::Encryption(format!("Invalid Argon2 params: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key = [0u8; 32];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| CoreError::Encryption(format!("Argon2 key derivation failed: {e}")))?;
    Ok(key)
}

fn random_bytes<const N: usize>() -> Result<[u8; N], CoreError> {
    let mut bytes = [0u8; N];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| CoreError::Encryption(format!("Failed to generate random bytes: {e}")))?;
    Ok(bytes)
}

fn le_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}
