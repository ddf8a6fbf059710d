//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`balance`] - `ScriptedBalances`, a table-driven
//!   [`BalanceSource`](crate::port::BalanceSource) with an optional gate.
//! - [`notifier`] - `RecordingNotifier` for asserting on emitted events.
//! - [`persistence`] - `SpyPersistence`, an in-memory state backend that
//!   records every save.

pub mod balance;
pub mod notifier;
pub mod persistence;
