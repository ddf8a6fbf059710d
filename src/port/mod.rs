//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (balance API, state file, Telegram).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Balance │            │ Persistence │              │ Notifier  │
//! │ Adapter │            │   Adapter   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`BalanceSource`] - Token balance lookups
//! - [`StatePersistence`] - Whole-state load and save
//! - [`Notifier`] - Balance notifications (Telegram, logging, etc.)

pub mod outbound;

pub use outbound::balance::BalanceSource;
pub use outbound::notifier::{
    BalanceEvent, Event, LogNotifier, Notifier, NotifierRegistry, NullNotifier,
};
pub use outbound::persistence::StatePersistence;
