//! Etherscan API settings.

use serde::Deserialize;

/// Settings for the token balance endpoint.
///
/// The API key is never read from the config file; it comes from
/// `ETHERSCAN_API_KEY`.
#[derive(Debug, Clone, Deserialize)]
pub struct EtherscanConfig {
    /// Base URL of the account API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// API key, filled from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Fixed delay before every request, in milliseconds.
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
    /// Whole-request timeout, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Optional proxy URL for all requests.
    #[serde(default)]
    pub proxy: Option<String>,
}

fn default_api_url() -> String {
    "https://api.etherscan.io/api".to_string()
}

const fn default_throttle_ms() -> u64 {
    250
}

const fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for EtherscanConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            throttle_ms: default_throttle_ms(),
            timeout_ms: default_timeout_ms(),
            proxy: None,
        }
    }
}
