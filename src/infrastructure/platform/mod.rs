//! Secret store implementations
//!
//! The vault's only persistence dependency is a per-item secret store with
//! async get/set/delete by string key. `EncryptedFileStore` provides
//! encrypted-at-rest storage:
//! - AES-256-GCM with a key derived from a passphrase via Argon2id
//! - per-slot random salt persisted beside the data file
//! - hashed filenames to prevent slot enumeration
//! - owner-only file permissions

use crate::shared::constants::{KEY_SIZE, NONCE_SIZE, SALT_SIZE};
use crate::shared::error::VaultError;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit};
use argon2::{Argon2, PasswordHasher};
use async_trait::async_trait;
use rand_core::{OsRng, RngCore};
use std::collections::HashMap;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;
use zeroize::Zeroizing;

/// Per-item secret storage with async access by string key.
///
/// Values are opaque strings. A missing key reads as `None` and deleting a
/// missing key succeeds; only genuine store failures surface as errors.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Store a secret value
    async fn put(&self, key: &str, value: &str) -> Result<(), VaultError>;

    /// Retrieve a secret value, or `None` if the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>, VaultError>;

    /// Delete a secret value (idempotent)
    async fn delete(&self, key: &str) -> Result<(), VaultError>;

    /// Check whether a key exists
    async fn exists(&self, key: &str) -> Result<bool, VaultError>;
}

/// Encrypted-at-rest file-backed secret store
pub struct EncryptedFileStore {
    base_dir: PathBuf,
    passphrase: Zeroizing<String>,
}

impl EncryptedFileStore {
    pub fn new(base_dir: impl Into<PathBuf>, passphrase: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            passphrase: Zeroizing::new(passphrase.into()),
        }
    }

    // Hash the slot key for the filename to prevent slot enumeration
    fn hashed_name(key: &str) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let hash = hasher.finalize();
        hex::encode(&hash[..16])
    }

    fn data_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.dat", Self::hashed_name(key)))
    }

    fn salt_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.salt", Self::hashed_name(key)))
    }

    // Derive the encryption key from the passphrase with Argon2id
    fn derive_key(&self, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_SIZE]>, VaultError> {
        let salt = argon2::password_hash::SaltString::encode_b64(salt)?;
        let argon2 = Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            argon2::Params::new(65536, 3, 1, Some(KEY_SIZE))?,
        );
        let password_hash = argon2
            .hash_password(self.passphrase.as_bytes(), &salt)
            .map_err(|e| VaultError::crypto(format!("Passphrase hashing failed: {}", e)))?;

        let hash = password_hash
            .hash
            .ok_or_else(|| VaultError::crypto("Passphrase hash is empty".to_string()))?;
        let mut key = Zeroizing::new([0u8; KEY_SIZE]);
        key.copy_from_slice(&hash.as_bytes()[..KEY_SIZE]);
        Ok(key)
    }

    async fn load_or_create_salt(&self, key: &str) -> Result<Zeroizing<Vec<u8>>, VaultError> {
        let salt_path = self.salt_path(key);
        match fs::read(&salt_path).await {
            Ok(salt) => Ok(Zeroizing::new(salt)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let mut salt = Zeroizing::new(vec![0u8; SALT_SIZE]);
                let mut rng = OsRng;
                rng.fill_bytes(salt.as_mut_slice());
                fs::write(&salt_path, salt.as_slice()).await?;
                fs::set_permissions(&salt_path, std::fs::Permissions::from_mode(0o600)).await?;
                Ok(salt)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn read_salt(&self, key: &str) -> Result<Zeroizing<Vec<u8>>, VaultError> {
        match fs::read(self.salt_path(key)).await {
            Ok(salt) => Ok(Zeroizing::new(salt)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(VaultError::crypto(
                "Salt file missing for an existing slot".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

async fn remove_if_present(path: &Path) -> Result<(), VaultError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl SecretStore for EncryptedFileStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), VaultError> {
        fs::create_dir_all(&self.base_dir).await?;

        let salt = self.load_or_create_salt(key).await?;
        let cipher_key = self.derive_key(&salt)?;
        let cipher = Aes256Gcm::new(GenericArray::from_slice(&*cipher_key));

        let mut nonce = [0u8; NONCE_SIZE];
        let mut rng = OsRng;
        rng.fill_bytes(&mut nonce);

        let ciphertext = cipher
            .encrypt(GenericArray::from_slice(&nonce), value.as_bytes())
            .map_err(|e| VaultError::crypto(format!("Encryption failed: {}", e)))?;

        let mut blob = nonce.to_vec();
        blob.extend_from_slice(&ciphertext);

        let path = self.data_path(key);
        fs::write(&path, &blob).await?;
        fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, VaultError> {
        let blob = match fs::read(self.data_path(key)).await {
            Ok(blob) => blob,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if blob.len() < NONCE_SIZE {
            return Err(VaultError::crypto("Stored blob too short".to_string()));
        }

        let salt = self.read_salt(key).await?;
        let cipher_key = self.derive_key(&salt)?;
        let cipher = Aes256Gcm::new(GenericArray::from_slice(&*cipher_key));

        let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);
        let plaintext = cipher
            .decrypt(GenericArray::from_slice(nonce), ciphertext)
            .map_err(|e| VaultError::crypto(format!("Decryption failed: {}", e)))?;

        let value = String::from_utf8(plaintext)
            .map_err(|_| VaultError::crypto("Stored value is not valid UTF-8".to_string()))?;
        Ok(Some(value))
    }

    async fn delete(&self, key: &str) -> Result<(), VaultError> {
        remove_if_present(&self.data_path(key)).await?;
        remove_if_present(&self.salt_path(key)).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, VaultError> {
        Ok(fs::try_exists(self.data_path(key)).await?)
    }
}

/// In-memory secret store for tests and demos
pub struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, VaultError> {
        self.data
            .lock()
            .map_err(|_| VaultError::storage("Secret store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), VaultError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, VaultError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), VaultError> {
        self.lock()?.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, VaultError> {
        Ok(self.lock()?.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_operations() {
        let store = MemoryStore::new();

        assert_eq!(store.get("missing").await.expect("get failed"), None);
        assert!(!store.exists("missing").await.expect("exists failed"));

        store.put("slot", "value").await.expect("put failed");
        assert!(store.exists("slot").await.expect("exists failed"));
        assert_eq!(
            store.get("slot").await.expect("get failed"),
            Some("value".to_string())
        );

        store.delete("slot").await.expect("delete failed");
        assert_eq!(store.get("slot").await.expect("get failed"), None);
        // Deleting again is not an error
        store.delete("slot").await.expect("repeat delete failed");
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = EncryptedFileStore::new(dir.path(), "correct horse battery staple");

        store
            .put("wallet_mnemonic", "abandon ability able")
            .await
            .expect("put failed");
        assert!(store.exists("wallet_mnemonic").await.expect("exists failed"));
        assert_eq!(
            store.get("wallet_mnemonic").await.expect("get failed"),
            Some("abandon ability able".to_string())
        );

        // Overwrite replaces the value
        store
            .put("wallet_mnemonic", "zoo zoo zoo")
            .await
            .expect("overwrite failed");
        assert_eq!(
            store.get("wallet_mnemonic").await.expect("get failed"),
            Some("zoo zoo zoo".to_string())
        );
    }

    #[tokio::test]
    async fn test_file_store_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = EncryptedFileStore::new(dir.path(), "pw");

        assert_eq!(store.get("absent").await.expect("get failed"), None);
        assert!(!store.exists("absent").await.expect("exists failed"));
        store.delete("absent").await.expect("delete of absent key failed");
    }

    #[tokio::test]
    async fn test_file_store_wrong_passphrase_fails_closed() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = EncryptedFileStore::new(dir.path(), "right");
        store.put("slot", "secret").await.expect("put failed");

        let wrong = EncryptedFileStore::new(dir.path(), "wrong");
        let result = wrong.get("slot").await;
        assert!(matches!(result, Err(VaultError::Crypto(_))));
    }

    #[tokio::test]
    async fn test_file_store_filenames_do_not_leak_slot_names() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = EncryptedFileStore::new(dir.path(), "pw");
        store.put("wallet_mnemonic", "value").await.expect("put failed");

        for entry in std::fs::read_dir(dir.path()).expect("Failed to read dir") {
            let name = entry.expect("Failed to read entry").file_name();
            assert!(!name.to_string_lossy().contains("mnemonic"));
        }
    }

    #[tokio::test]
    async fn test_file_store_delete_removes_salt_and_data() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = EncryptedFileStore::new(dir.path(), "pw");
        store.put("slot", "value").await.expect("put failed");
        store.delete("slot").await.expect("delete failed");

        let remaining = std::fs::read_dir(dir.path())
            .expect("Failed to read dir")
            .count();
        assert_eq!(remaining, 0);
        assert_eq!(store.get("slot").await.expect("get failed"), None);
    }
}
