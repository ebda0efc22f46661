//! Deterministic per-asset key derivation
//!
//! This module derives one key pair per supported asset from the shared
//! mnemonic seed: BIP-32 child derivation along the asset's BIP-44 path,
//! then asset-specific address and private-key encoding. Bitcoin and
//! Ethereum keys are derived independently; the two chains never share
//! key material.

use crate::core::mnemonic::SecureMnemonic;
use crate::shared::constants::{BTC_P2PKH_VERSION, BTC_WIF_VERSION};
use crate::shared::error::VaultError;
use crate::shared::types::{Asset, KeyPair};
use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::str::FromStr;
use zeroize::Zeroizing;

/// Key deriver for per-asset deterministic derivation
pub struct KeyDeriver {
    secp256k1: Secp256k1<secp256k1::All>,
}

impl KeyDeriver {
    pub fn new() -> Self {
        Self {
            secp256k1: Secp256k1::new(),
        }
    }

    /// Derive the key pair for one asset from a validated mnemonic.
    ///
    /// Deterministic: the same mnemonic and asset always yield the same
    /// address and private key.
    pub fn derive(&self, mnemonic: &SecureMnemonic, asset: Asset) -> Result<KeyPair, VaultError> {
        let child_key = self.derive_child_key(mnemonic, asset.derivation_path())?;
        match asset {
            Asset::Bitcoin => self.bitcoin_keypair(&child_key),
            Asset::Ethereum => self.ethereum_keypair(&child_key),
        }
    }

    /// Derive the raw child private key at the given path from the
    /// mnemonic's BIP-39 seed (empty passphrase).
    fn derive_child_key(
        &self,
        mnemonic: &SecureMnemonic,
        path: &str,
    ) -> Result<Zeroizing<[u8; 32]>, VaultError> {
        let parsed = Mnemonic::parse_in_normalized(Language::English, mnemonic.as_str())
            .map_err(|e| VaultError::invalid_mnemonic(format!("BIP39 parse failed: {}", e)))?;

        let seed = bip32::Seed::new(parsed.to_seed_normalized(""));
        let xprv = XPrv::new(seed.as_bytes())?;

        let derivation_path = DerivationPath::from_str(path)?;
        let mut child_xprv = xprv;
        for child_number in derivation_path.into_iter() {
            child_xprv = child_xprv.derive_child(child_number)?;
        }

        let key: [u8; 32] = child_xprv.private_key().to_bytes().into();
        Ok(Zeroizing::new(key))
    }

    /// Ethereum: uncompressed public key, Keccak-256, last 20 bytes,
    /// EIP-55 checksum casing. Private key is 0x-prefixed hex.
    fn ethereum_keypair(&self, key: &[u8; 32]) -> Result<KeyPair, VaultError> {
        let secret_key = SecretKey::from_byte_array(*key)?;
        let public_key = PublicKey::from_secret_key(&self.secp256k1, &secret_key);
        let uncompressed = public_key.serialize_uncompressed();

        // Skip the 0x04 prefix; address is the last 20 bytes of the hash
        let hash = keccak256(&uncompressed[1..]);
        let address = to_checksum_address(&hash[12..]);

        Ok(KeyPair::new(address, format!("0x{}", hex::encode(key))))
    }

    /// Bitcoin: compressed public key, HASH160, Base58Check P2PKH address.
    /// Private key is compressed-key WIF.
    fn bitcoin_keypair(&self, key: &[u8; 32]) -> Result<KeyPair, VaultError> {
        let secret_key = SecretKey::from_byte_array(*key)?;
        let public_key = PublicKey::from_secret_key(&self.secp256k1, &secret_key);
        let compressed = public_key.serialize();

        let digest = hash160(&compressed);
        let address = bs58::encode(digest)
            .with_check_version(BTC_P2PKH_VERSION)
            .into_string();

        // WIF payload: 32-byte key plus the compressed-key flag
        let mut wif_payload = Zeroizing::new(key.to_vec());
        wif_payload.push(0x01);
        let wif = bs58::encode(wif_payload.as_slice())
            .with_check_version(BTC_WIF_VERSION)
            .into_string();

        Ok(KeyPair::new(address, wif))
    }
}

/// Keccak256 hash function
fn keccak256(data: &[u8]) -> [u8; 32] {
    use sha3::{Digest, Keccak256};
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 followed by RIPEMD-160
fn hash160(data: &[u8]) -> [u8; 20] {
    use ripemd::Ripemd160;
    use sha2::{Digest, Sha256};
    let sha = Sha256::digest(data);
    let mut hasher = Ripemd160::new();
    hasher.update(sha);
    hasher.finalize().into()
}

/// EIP-55 mixed-case checksum encoding of a 20-byte Ethereum address
fn to_checksum_address(address_bytes: &[u8]) -> String {
    let lower = hex::encode(address_bytes);
    let hash = keccak256(lower.as_bytes());

    let mut address = String::with_capacity(2 + lower.len());
    address.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            address.push(c.to_ascii_uppercase());
        } else {
            address.push(c);
        }
    }
    address
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn test_mnemonic() -> SecureMnemonic {
        SecureMnemonic::new(TEST_MNEMONIC.to_string())
    }

    #[test]
    fn test_ethereum_fixed_vector() {
        let deriver = KeyDeriver::new();
        let pair = deriver
            .derive(&test_mnemonic(), Asset::Ethereum)
            .expect("Failed to derive Ethereum key pair");

        assert_eq!(pair.address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
        assert_eq!(
            pair.private_key.as_str(),
            "0x1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727"
        );
    }

    #[test]
    fn test_bitcoin_fixed_vector() {
        let deriver = KeyDeriver::new();
        let pair = deriver
            .derive(&test_mnemonic(), Asset::Bitcoin)
            .expect("Failed to derive Bitcoin key pair");

        assert_eq!(pair.address, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
    }

    #[test]
    fn test_bitcoin_private_key_is_compressed_wif() {
        let deriver = KeyDeriver::new();
        let pair = deriver
            .derive(&test_mnemonic(), Asset::Bitcoin)
            .expect("Failed to derive Bitcoin key pair");

        let wif = pair.private_key.as_str();
        assert_eq!(wif.len(), 52);
        assert!(wif.starts_with('K') || wif.starts_with('L'));

        let payload = bs58::decode(wif)
            .with_check(Some(BTC_WIF_VERSION))
            .into_vec()
            .expect("WIF checksum must verify");
        // version byte, 32 key bytes, compressed flag
        assert_eq!(payload.len(), 34);
        assert_eq!(payload[0], BTC_WIF_VERSION);
        assert_eq!(payload[33], 0x01);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let deriver = KeyDeriver::new();
        for asset in [Asset::Bitcoin, Asset::Ethereum] {
            let first = deriver
                .derive(&test_mnemonic(), asset)
                .expect("Failed to derive key pair");
            let second = deriver
                .derive(&test_mnemonic(), asset)
                .expect("Failed to derive key pair");
            assert_eq!(first.address, second.address);
            assert_eq!(first.private_key.as_str(), second.private_key.as_str());
        }
    }

    #[test]
    fn test_assets_derive_independent_keys() {
        let deriver = KeyDeriver::new();
        let btc = deriver
            .derive(&test_mnemonic(), Asset::Bitcoin)
            .expect("Failed to derive Bitcoin key pair");
        let eth = deriver
            .derive(&test_mnemonic(), Asset::Ethereum)
            .expect("Failed to derive Ethereum key pair");

        assert_ne!(btc.address, eth.address);
        assert_ne!(btc.private_key.as_str(), eth.private_key.as_str());
        // Raw child keys differ as well, not just their encodings
        let btc_raw = deriver
            .derive_child_key(&test_mnemonic(), Asset::Bitcoin.derivation_path())
            .expect("Failed to derive Bitcoin child key");
        let eth_raw = deriver
            .derive_child_key(&test_mnemonic(), Asset::Ethereum.derivation_path())
            .expect("Failed to derive Ethereum child key");
        assert_ne!(*btc_raw, *eth_raw);
    }

    #[test]
    fn test_different_mnemonics_derive_different_addresses() {
        let deriver = KeyDeriver::new();
        let other = SecureMnemonic::new(
            "legal winner thank year wave sausage worth useful legal winner thank yellow".to_string(),
        );
        let a = deriver
            .derive(&test_mnemonic(), Asset::Ethereum)
            .expect("Failed to derive key pair");
        let b = deriver
            .derive(&other, Asset::Ethereum)
            .expect("Failed to derive key pair");
        assert_ne!(a.address, b.address);
    }

    #[test]
    fn test_unparseable_mnemonic_is_rejected() {
        let deriver = KeyDeriver::new();
        let garbage = SecureMnemonic::new("definitely not a mnemonic".to_string());
        let result = deriver.derive(&garbage, Asset::Ethereum);
        assert!(matches!(result, Err(VaultError::InvalidMnemonic(_))));
    }

    #[test]
    fn test_checksum_address_casing() {
        // EIP-55 reference vector
        let bytes = hex::decode("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed")
            .expect("Failed to decode address hex");
        assert_eq!(
            to_checksum_address(&bytes),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }
}
