//! Balance lookup port.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::FetchError;

/// Source of current token balances.
///
/// Implementations make a single attempt per call. Any failure is reported
/// as [`FetchError::Unavailable`]; callers treat every wallet independently.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Current balance of `wallet` for the token at `contract`, in raw units.
    async fn balance(&self, contract: &str, wallet: &str) -> Result<Decimal, FetchError>;
}
