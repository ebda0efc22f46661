//! Wallet Vault Core
//!
//! Key vault for a two-asset mnemonic wallet. Handles the wallet
//! key-material lifecycle: mnemonic generation and validation,
//! deterministic per-asset key derivation, and encrypted-at-rest secret
//! storage with full deletion on reset.
//!
//! ## Architecture
//!
//! - **Core**: mnemonic handling, key derivation, vault lifecycle
//! - **Domain**: consumed collaborator interfaces (balance, broadcast)
//! - **Infrastructure**: secret store implementations
//! - **Shared**: common types, constants, and errors
//!
//! ## Security properties
//!
//! - Mnemonic entropy comes from the OS CSPRNG
//! - Bitcoin and Ethereum keys are derived independently from the shared
//!   seed; the chains never share key material
//! - Secrets are encrypted at rest and zeroized in memory on drop
//! - No secret material ever reaches logs or error messages
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use wallet_vault_core::{KeyVault, MemoryStore};
//!
//! # async fn demo() -> Result<(), wallet_vault_core::VaultError> {
//! let vault = KeyVault::new(Arc::new(MemoryStore::new()));
//!
//! let mnemonic = vault.generate_mnemonic()?;
//! let record = vault.create_wallet(mnemonic.as_str()).await?;
//! println!("BTC address: {}", record.bitcoin.address);
//!
//! vault.delete_wallet().await?;
//! # Ok(())
//! # }
//! ```

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main components
pub use crate::core::derivation::KeyDeriver;
pub use crate::core::mnemonic::{self, SecureMnemonic};
pub use crate::core::vault::KeyVault;
pub use crate::domain::services::{BalanceSource, TxBroadcaster};
pub use crate::infrastructure::platform::{EncryptedFileStore, MemoryStore, SecretStore};
pub use crate::shared::error::VaultError;
pub use crate::shared::types::{Address, Asset, Balance, KeyPair, VaultRecord, WalletAddresses};

use crate::shared::constants::DEFAULT_VAULT_DIR_NAME;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::try_init()?;
    Ok(())
}

/// Vault configuration from .env or safe defaults
#[derive(Debug, Clone)]
pub struct VaultConfig {
    pub base_dir: PathBuf,
    pub passphrase: Option<String>,
}

impl VaultConfig {
    pub fn from_env() -> Self {
        dotenv().ok(); // Load .env if present

        let base_dir = env::var("WALLET_VAULT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_vault_dir());
        let passphrase = env::var("WALLET_VAULT_PASSPHRASE").ok();

        Self {
            base_dir,
            passphrase,
        }
    }
}

/// OS-specific default storage directory
pub fn default_vault_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("./secure_storage"))
        .join(DEFAULT_VAULT_DIR_NAME)
}

/// Initialize the key vault with configuration from .env or safe defaults.
///
/// The encrypted file store requires `WALLET_VAULT_PASSPHRASE`; a missing
/// passphrase is a configuration error rather than a silent fallback to
/// plaintext storage.
pub async fn init_key_vault() -> Result<KeyVault, VaultError> {
    let config = VaultConfig::from_env();
    let passphrase = config
        .passphrase
        .ok_or_else(|| VaultError::config("WALLET_VAULT_PASSPHRASE is not set"))?;

    let store = EncryptedFileStore::new(config.base_dir, passphrase);
    log::info!("Key vault initialized with encrypted file store");
    Ok(KeyVault::new(Arc::new(store)))
}
