//! Etherscan REST client for ERC-20 token balances.
//!
//! Every lookup waits a fixed throttle delay, then makes exactly one
//! request bounded by the configured timeout. There is no retry: a failed
//! lookup is reported and the caller moves on.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use rust_decimal::Decimal;
use tokio::time::sleep;
use tracing::debug;

use super::dto::parse_balance_body;
use super::settings::EtherscanConfig;
use crate::error::{ConfigError, FetchError};
use crate::port::BalanceSource;

/// HTTP client for the Etherscan account API.
pub struct EtherscanClient {
    http: HttpClient,
    api_url: String,
    api_key: String,
    throttle: Duration,
}

impl EtherscanClient {
    /// Build a client from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, the proxy URL is invalid,
    /// or the HTTP client cannot be built.
    pub fn from_config(config: &EtherscanConfig) -> crate::error::Result<Self> {
        let api_key = config.api_key.clone().ok_or(ConfigError::MissingField {
            field: "ETHERSCAN_API_KEY",
        })?;

        let mut builder = HttpClient::builder().timeout(Duration::from_millis(config.timeout_ms));
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            http: builder.build()?,
            api_url: config.api_url.clone(),
            api_key,
            throttle: Duration::from_millis(config.throttle_ms),
        })
    }

    /// The request issued for one lookup.
    fn balance_request(&self, contract: &str, wallet: &str) -> reqwest::Result<reqwest::Request> {
        self.http
            .get(&self.api_url)
            .query(&[
                ("module", "account"),
                ("action", "tokenbalance"),
                ("contractaddress", contract),
                ("address", wallet),
                ("tag", "latest"),
                ("apikey", self.api_key.as_str()),
            ])
            .build()
    }

    async fn fetch(&self, contract: &str, wallet: &str) -> Result<Decimal, FetchError> {
        let request = self.balance_request(contract, wallet)?;
        let response = self.http.execute(request).await?.error_for_status()?;
        let body = response.text().await?;
        parse_balance_body(&body)
    }
}

#[async_trait]
impl BalanceSource for EtherscanClient {
    async fn balance(&self, contract: &str, wallet: &str) -> Result<Decimal, FetchError> {
        if !self.throttle.is_zero() {
            sleep(self.throttle).await;
        }

        let result = self.fetch(contract, wallet).await;
        if let Err(e) = &result {
            debug!(contract = %contract, wallet = %wallet, error = %e, "Balance lookup failed");
        }
        result
    }
}
