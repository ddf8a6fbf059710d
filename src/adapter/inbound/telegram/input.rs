//! Mapping between Telegram payloads and conversation types.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::application::conversation::{Button, Input};

/// Classify a text message.
///
/// `/start` (optionally addressed as `/start@bot_name`) opens the menu;
/// anything else is free text for the current prompt.
#[must_use]
pub fn input_from_text(text: &str) -> Input {
    let first = text.split_whitespace().next().unwrap_or_default();
    let command = first.split_once('@').map_or(first, |(head, _)| head);

    if command == "/start" {
        Input::Start
    } else {
        Input::Text(text.to_string())
    }
}

/// Build the inline keyboard for a screen.
#[must_use]
pub fn keyboard_markup(rows: &[Vec<Button>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    }))
}
