//! Consumed service interfaces
//!
//! Seams for the network-facing collaborators the wallet UI combines with
//! the vault. Real implementations are network clients living outside this
//! crate; implementations must not retry a failed broadcast automatically,
//! since blind retry of a funds transfer risks duplicate submission.

use crate::shared::error::VaultError;
use crate::shared::types::{Asset, Balance, TransactionHash};
use async_trait::async_trait;

/// Balance lookup per asset, keyed by address
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn balance_of(&self, asset: Asset, address: &str) -> Result<Balance, VaultError>;
}

/// Transaction broadcast per asset
#[async_trait]
pub trait TxBroadcaster: Send + Sync {
    async fn broadcast(
        &self,
        asset: Asset,
        to_address: &str,
        amount: &str,
        signing_key: &str,
    ) -> Result<TransactionHash, VaultError>;
}
