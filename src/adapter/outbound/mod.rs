//! Outbound adapters (driven side).

pub mod etherscan;
pub mod file;
pub mod notifier;
