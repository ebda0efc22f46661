//! Domain layer - collaborator seams
//!
//! This module defines the interfaces the vault's callers combine with it:
//! network-backed balance and broadcast services, consumed by the UI layer
//! and implemented outside this crate.

pub mod services;

// Re-export domain components
pub use services::*;
