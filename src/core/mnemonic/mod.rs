//! Mnemonic generation and validation
//!
//! BIP-39 mnemonic handling: generation from fresh CSPRNG entropy,
//! caller-side normalization, and pure validation against the English
//! wordlist and checksum.

use crate::shared::constants::MNEMONIC_ENTROPY_SIZE;
use crate::shared::error::VaultError;
use bip39::{Language, Mnemonic};
use rand_core::{OsRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

/// Secure mnemonic wrapper, zeroized on drop
#[derive(Clone)]
pub struct SecureMnemonic {
    phrase: String,
}

impl SecureMnemonic {
    pub fn new(phrase: String) -> Self {
        Self { phrase }
    }

    /// Get the phrase as a &str
    pub fn as_str(&self) -> &str {
        &self.phrase
    }

    /// Get the phrase as `Vec<String>`
    pub fn as_words(&self) -> Vec<String> {
        self.phrase.split_whitespace().map(|s| s.to_string()).collect()
    }

    pub fn word_count(&self) -> usize {
        self.phrase.split_whitespace().count()
    }
}

impl Drop for SecureMnemonic {
    fn drop(&mut self) {
        // Clear the phrase when dropped
        self.phrase.zeroize();
    }
}

// Keep the phrase out of debug output
impl std::fmt::Debug for SecureMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureMnemonic")
            .field("phrase", &"<redacted>")
            .field("word_count", &self.word_count())
            .finish()
    }
}

/// Generate a fresh 12-word mnemonic from 128 bits of OS entropy.
///
/// No side effects; callable repeatedly until the user accepts a phrase.
pub fn generate() -> Result<SecureMnemonic, VaultError> {
    let mut entropy = Zeroizing::new([0u8; MNEMONIC_ENTROPY_SIZE]);
    let mut rng = OsRng;
    rng.fill_bytes(&mut *entropy);

    let mnemonic = Mnemonic::from_entropy_in(Language::English, &*entropy)
        .map_err(|e| VaultError::crypto(format!("Mnemonic generation failed: {}", e)))?;

    Ok(SecureMnemonic::new(mnemonic.to_string()))
}

/// Normalize raw user input before validation: lowercase, trimmed, and
/// with runs of whitespace collapsed to single spaces.
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validate wordlist membership and checksum. Pure; malformed input
/// returns `false` rather than an error. Callers normalize first.
pub fn validate(candidate: &str) -> bool {
    Mnemonic::parse_in_normalized(Language::English, candidate).is_ok()
}
