//! Etherscan adapter: token balance lookups over the account API.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::EtherscanClient;
pub use settings::EtherscanConfig;
