//! Tokenwatch - ERC-20 balance watching over Telegram.
//!
//! Users register `(token contract, wallet)` pairs through a menu-driven
//! Telegram conversation. A periodic reconciliation pass looks up every
//! watched balance and messages the owner when a balance is first seen or
//! changes.
//!
//! # Architecture
//!
//! - [`domain`] - Watch list and balance-change types, free of I/O
//! - [`port`] - Traits for balance lookups, persistence, and notification
//! - [`adapter`] - Etherscan client, JSON state file, Telegram, CLI
//! - [`application`] - Shared watch list, reconciler, conversation
//! - [`infrastructure`] - Configuration, logging, process wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Telegram front end and notifications
//! - `testkit` - Test doubles for integration tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
