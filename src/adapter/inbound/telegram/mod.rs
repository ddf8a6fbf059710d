//! Telegram front end.
//!
//! Turns chat messages and inline-keyboard presses into conversation
//! [`Input`](crate::application::conversation::Input)s and sends back the
//! resulting screens.
//!
//! Requires the `telegram` feature to be enabled.

mod bot;
mod input;

pub use bot::{bot_commands, run_frontend};
pub use input::{input_from_text, keyboard_markup};
