use crate::shared::constants::{
    BTC_ADDRESS_SLOT, BTC_DERIVATION_PATH, BTC_PRIVATE_KEY_SLOT, ETH_ADDRESS_SLOT,
    ETH_DERIVATION_PATH, ETH_PRIVATE_KEY_SLOT,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

// Basic types for vault operations
pub type Address = String;
pub type Balance = String;
pub type TransactionHash = String;

/// Supported assets - the primary chain (Bitcoin) and the secondary chain
/// (Ethereum), each with its own derivation path and slot pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Asset {
    Bitcoin,
    Ethereum,
}

impl Asset {
    pub fn name(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "Bitcoin",
            Asset::Ethereum => "Ethereum",
        }
    }

    pub fn ticker(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "BTC",
            Asset::Ethereum => "ETH",
        }
    }

    pub fn derivation_path(&self) -> &'static str {
        match self {
            Asset::Bitcoin => BTC_DERIVATION_PATH,
            Asset::Ethereum => ETH_DERIVATION_PATH,
        }
    }

    pub fn address_slot(&self) -> &'static str {
        match self {
            Asset::Bitcoin => BTC_ADDRESS_SLOT,
            Asset::Ethereum => ETH_ADDRESS_SLOT,
        }
    }

    pub fn private_key_slot(&self) -> &'static str {
        match self {
            Asset::Bitcoin => BTC_PRIVATE_KEY_SLOT,
            Asset::Ethereum => ETH_PRIVATE_KEY_SLOT,
        }
    }
}

/// A derived address/private-key pair for one asset.
///
/// Both values are recomputable from the mnemonic at any time; persisted
/// copies are a cache, not independent state. The private key is WIF for
/// Bitcoin and 0x-prefixed hex for Ethereum.
#[derive(Clone)]
pub struct KeyPair {
    pub address: Address,
    pub private_key: Zeroizing<String>,
}

impl KeyPair {
    pub fn new(address: Address, private_key: String) -> Self {
        Self {
            address,
            private_key: Zeroizing::new(private_key),
        }
    }
}

// Keep private keys out of debug output
impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// The full persisted secret state of one wallet: the mnemonic plus one
/// key pair per asset, stored as five independent slots.
#[derive(Debug, Clone)]
pub struct VaultRecord {
    pub mnemonic: crate::core::mnemonic::SecureMnemonic,
    pub bitcoin: KeyPair,
    pub ethereum: KeyPair,
}

impl VaultRecord {
    pub fn addresses(&self) -> WalletAddresses {
        WalletAddresses {
            bitcoin: Some(self.bitcoin.address.clone()),
            ethereum: Some(self.ethereum.address.clone()),
        }
    }
}

/// Public addresses read back from the vault. Absent slots are reported as
/// `None` rather than failing; callers interpret presence of both as
/// "wallet exists".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletAddresses {
    pub bitcoin: Option<Address>,
    pub ethereum: Option<Address>,
}

impl WalletAddresses {
    pub fn is_complete(&self) -> bool {
        self.bitcoin.is_some() && self.ethereum.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.bitcoin.is_none() && self.ethereum.is_none()
    }
}
