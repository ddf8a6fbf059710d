//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Command line and Telegram front ends
//! - [`outbound`] - Balance API, state file, and notification backends

pub mod inbound;
pub mod outbound;
