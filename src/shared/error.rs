//! Error handling for the key vault
//!
//! This module defines the error types used throughout the key vault.

use thiserror::Error;

/// Vault error type
#[derive(Error, Debug, Clone)]
pub enum VaultError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Derivation error: {0}")]
    Derivation(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VaultError {
    /// Create an invalid mnemonic error
    pub fn invalid_mnemonic(message: impl Into<String>) -> Self {
        Self::InvalidMnemonic(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a derivation error
    pub fn derivation(message: impl Into<String>) -> Self {
        Self::Derivation(message.into())
    }

    /// Create a cryptographic error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// Standard library error conversions
impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(format!("IO error: {}", err))
    }
}

impl From<hex::FromHexError> for VaultError {
    fn from(err: hex::FromHexError) -> Self {
        Self::crypto(format!("Hex decoding error: {}", err))
    }
}

// Cryptographic error conversions
impl From<secp256k1::Error> for VaultError {
    fn from(err: secp256k1::Error) -> Self {
        Self::derivation(format!("Secp256k1 error: {}", err))
    }
}

impl From<bip32::Error> for VaultError {
    fn from(err: bip32::Error) -> Self {
        Self::derivation(format!("BIP32 error: {}", err))
    }
}

impl From<argon2::password_hash::Error> for VaultError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::crypto(format!("Password hash error: {}", err))
    }
}

impl From<argon2::Error> for VaultError {
    fn from(err: argon2::Error) -> Self {
        Self::crypto(format!("Argon2 error: {}", err))
    }
}

// Encryption error conversions
impl From<aes_gcm::Error> for VaultError {
    fn from(err: aes_gcm::Error) -> Self {
        Self::crypto(format!("AES-GCM error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_error_creation() {
        let mnemonic_error = VaultError::invalid_mnemonic("checksum mismatch");
        let storage_error = VaultError::storage("write failed");
        let not_found_error = VaultError::not_found("wallet_mnemonic");

        assert!(matches!(mnemonic_error, VaultError::InvalidMnemonic(_)));
        assert!(matches!(storage_error, VaultError::Storage(_)));
        assert!(matches!(not_found_error, VaultError::NotFound(_)));
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let vault_error: VaultError = io_error.into();

        assert!(matches!(vault_error, VaultError::Storage(_)));
    }

    #[test]
    fn test_error_display() {
        let error = VaultError::derivation("bad child index");
        let display = format!("{}", error);

        assert!(display.contains("Derivation error"));
        assert!(display.contains("bad child index"));
    }
}
