//! Infrastructure layer - storage implementations
//!
//! This module contains the secret-store implementations backing the
//! vault: an encrypted file store for devices and an in-memory store for
//! tests and demos.

pub mod platform;

// Re-export infrastructure components
pub use platform::*;
