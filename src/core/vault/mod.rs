//! Vault lifecycle management
//!
//! The key vault owns the wallet's persisted secret state: one mnemonic
//! plus one derived key pair per asset, stored as five slots in the secret
//! store. The record is immutable after creation; the only transitions are
//! create (which overwrites any existing record) and full deletion.
//!
//! All operations are invoked sequentially from user-triggered actions.
//! Callers must not run a create or delete concurrently with other vault
//! access on the same store.

use crate::core::derivation::KeyDeriver;
use crate::core::mnemonic::{self, SecureMnemonic};
use crate::infrastructure::platform::SecretStore;
use crate::shared::constants::{
    BTC_ADDRESS_SLOT, BTC_PRIVATE_KEY_SLOT, ETH_ADDRESS_SLOT, ETH_PRIVATE_KEY_SLOT, MNEMONIC_SLOT,
    VAULT_SLOTS,
};
use crate::shared::error::VaultError;
use crate::shared::types::{Asset, VaultRecord, WalletAddresses};
use std::sync::Arc;

/// Key vault over a secret store
pub struct KeyVault {
    store: Arc<dyn SecretStore>,
    deriver: KeyDeriver,
}

impl KeyVault {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self {
            store,
            deriver: KeyDeriver::new(),
        }
    }

    /// Generate a fresh 12-word mnemonic. No side effects; the vault is
    /// untouched until the caller commits with [`create_wallet`].
    ///
    /// [`create_wallet`]: KeyVault::create_wallet
    pub fn generate_mnemonic(&self) -> Result<SecureMnemonic, VaultError> {
        mnemonic::generate()
    }

    /// Validate a candidate phrase. Callers normalize user input first,
    /// see [`mnemonic::normalize`].
    pub fn validate_mnemonic(&self, candidate: &str) -> bool {
        mnemonic::validate(candidate)
    }

    /// Create the wallet record from a validated mnemonic: derive one key
    /// pair per asset and persist all five slots.
    ///
    /// Overwrites any existing record without warning; callers gate this
    /// behind explicit user confirmation when a wallet already exists. If
    /// a slot write fails, slots written by this call are removed again
    /// before the error surfaces, so no partial record is left behind.
    pub async fn create_wallet(&self, phrase: &str) -> Result<VaultRecord, VaultError> {
        if !mnemonic::validate(phrase) {
            return Err(VaultError::invalid_mnemonic(
                "wordlist or checksum check failed",
            ));
        }
        let mnemonic = SecureMnemonic::new(phrase.to_string());

        // Derivation failures abort before anything is persisted
        let bitcoin = self.deriver.derive(&mnemonic, Asset::Bitcoin)?;
        let ethereum = self.deriver.derive(&mnemonic, Asset::Ethereum)?;

        let slots: [(&'static str, &str); 5] = [
            (MNEMONIC_SLOT, mnemonic.as_str()),
            (BTC_ADDRESS_SLOT, &bitcoin.address),
            (ETH_ADDRESS_SLOT, &ethereum.address),
            (BTC_PRIVATE_KEY_SLOT, bitcoin.private_key.as_str()),
            (ETH_PRIVATE_KEY_SLOT, ethereum.private_key.as_str()),
        ];

        let mut written: Vec<&'static str> = Vec::with_capacity(slots.len());
        for (slot, value) in slots {
            if let Err(err) = self.store.put(slot, value).await {
                log::warn!(
                    "Vault write failed on slot {}; removing {} previously written slot(s)",
                    slot,
                    written.len()
                );
                for cleanup_slot in &written {
                    if let Err(cleanup_err) = self.store.delete(cleanup_slot).await {
                        log::warn!("Cleanup of slot {} failed: {}", cleanup_slot, cleanup_err);
                    }
                }
                return Err(err);
            }
            written.push(slot);
        }

        log::info!("Vault record created");
        Ok(VaultRecord {
            mnemonic,
            bitcoin,
            ethereum,
        })
    }

    /// True only when every slot of the record exists. An interrupted
    /// write therefore reads as "no wallet".
    pub async fn wallet_exists(&self) -> Result<bool, VaultError> {
        for slot in VAULT_SLOTS {
            if !self.store.exists(slot).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Read the two address slots. Absent slots are reported as `None`
    /// rather than failing.
    pub async fn addresses(&self) -> Result<WalletAddresses, VaultError> {
        Ok(WalletAddresses {
            bitcoin: self.store.get(BTC_ADDRESS_SLOT).await?,
            ethereum: self.store.get(ETH_ADDRESS_SLOT).await?,
        })
    }

    /// Read the mnemonic slot. The highest-sensitivity read in the vault;
    /// call sites gate this behind explicit user intent.
    pub async fn mnemonic(&self) -> Result<SecureMnemonic, VaultError> {
        match self.store.get(MNEMONIC_SLOT).await? {
            Some(phrase) => Ok(SecureMnemonic::new(phrase)),
            None => Err(VaultError::not_found("wallet mnemonic slot is absent")),
        }
    }

    /// Delete every slot of the record. Attempts all slots even after a
    /// failure and reports the aggregate once, since a partial deletion
    /// still leaves recoverable secrets. Idempotent on an empty vault.
    pub async fn delete_wallet(&self) -> Result<(), VaultError> {
        let mut failed: Vec<&'static str> = Vec::new();
        for slot in VAULT_SLOTS {
            if let Err(err) = self.store.delete(slot).await {
                log::warn!("Failed to delete slot {}: {}", slot, err);
                failed.push(slot);
            }
        }
        if failed.is_empty() {
            log::info!("Vault record deleted");
            Ok(())
        } else {
            Err(VaultError::storage(format!(
                "Failed to delete slots: {}",
                failed.join(", ")
            )))
        }
    }
}
