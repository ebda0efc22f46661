//! Core key vault functionality
//!
//! This module contains the core functionality of the key vault: mnemonic
//! generation and validation, deterministic per-asset key derivation, and
//! the vault lifecycle itself.

pub mod derivation;
pub mod mnemonic;
pub mod vault;
