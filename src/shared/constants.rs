//! Constants for the key vault
//!
//! This module contains all constants used throughout the key vault.

// Secret store slot identifiers. The five slots together form one vault
// record; existence checks require all of them.
pub const MNEMONIC_SLOT: &str = "wallet_mnemonic";
pub const BTC_ADDRESS_SLOT: &str = "btc_address";
pub const ETH_ADDRESS_SLOT: &str = "eth_address";
pub const BTC_PRIVATE_KEY_SLOT: &str = "btc_private_key";
pub const ETH_PRIVATE_KEY_SLOT: &str = "eth_private_key";

/// Every slot belonging to a vault record, in write order.
pub const VAULT_SLOTS: [&str; 5] = [
    MNEMONIC_SLOT,
    BTC_ADDRESS_SLOT,
    ETH_ADDRESS_SLOT,
    BTC_PRIVATE_KEY_SLOT,
    ETH_PRIVATE_KEY_SLOT,
];

// Mnemonic constants
pub const MNEMONIC_WORD_COUNT: usize = 12;
pub const MNEMONIC_ENTROPY_SIZE: usize = 16; // 128 bits

// Derivation paths (BIP-44)
pub const BTC_DERIVATION_PATH: &str = "m/44'/0'/0'/0/0";
pub const ETH_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

// Bitcoin serialization version bytes
pub const BTC_P2PKH_VERSION: u8 = 0x00;
pub const BTC_WIF_VERSION: u8 = 0x80;

// Security constants
pub const PRIVATE_KEY_SIZE: usize = 32;
pub const KEY_SIZE: usize = 32;
pub const NONCE_SIZE: usize = 12;
pub const SALT_SIZE: usize = 32;

// Storage constants
pub const DEFAULT_VAULT_DIR_NAME: &str = "wallet-vault";
