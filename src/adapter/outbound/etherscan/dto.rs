//! Etherscan response payloads.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;

/// Body of `module=account&action=tokenbalance`.
///
/// On success `result` holds the balance in raw token units as a string.
/// On failure Etherscan still answers 200 with `status = "0"` and a
/// human-readable `result` such as `"Invalid API Key"`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenBalanceResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

impl TokenBalanceResponse {
    /// Balance carried by the `result` field.
    pub fn amount(&self) -> Result<Decimal, FetchError> {
        let raw = match &self.result {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(FetchError::unavailable(format!(
                    "unexpected result type: {other}"
                )))
            }
            None => {
                return Err(FetchError::unavailable(format!(
                    "missing result field (message: {})",
                    self.message.as_deref().unwrap_or("none")
                )))
            }
        };

        let amount = parse_decimal(&raw)
            .ok_or_else(|| FetchError::unavailable(format!("non-numeric result: {raw}")))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(FetchError::unavailable(format!("negative result: {raw}")));
        }
        Ok(amount)
    }
}

/// Parse plain or scientific decimal notation.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Decode a raw response body.
pub fn parse_balance_body(body: &str) -> Result<Decimal, FetchError> {
    let response: TokenBalanceResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::unavailable(format!("malformed body: {e}")))?;
    response.amount()
}
