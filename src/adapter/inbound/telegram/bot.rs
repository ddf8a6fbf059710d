//! Update dispatcher for the Telegram front end.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{debug, info, warn};

use super::input::{input_from_text, keyboard_markup};
use crate::application::conversation::{Input, Screen};
use crate::application::Dialogs;
use crate::domain::UserId;

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![("start", "Open the main menu")]
}

/// Serve chat updates until the dispatcher stops (Ctrl-C).
pub async fn run_frontend(bot: Bot, dialogs: Arc<Dialogs>) {
    // Register commands with Telegram so they appear in the "/" menu
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!("Telegram front end started");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dialogs])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Telegram front end stopped");
}

async fn on_message(bot: Bot, msg: Message, dialogs: Arc<Dialogs>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let user = UserId(msg.chat.id.0);
    let screen = dialogs.handle(user, input_from_text(text)).await;
    send_screen(&bot, msg.chat.id, screen).await
}

async fn on_callback(bot: Bot, query: CallbackQuery, dialogs: Arc<Dialogs>) -> ResponseResult<()> {
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(data) = query.data else {
        return Ok(());
    };

    // The menu lives in private chats, where the chat id is the user id.
    let chat_id = ChatId::from(query.from.id);
    debug!(chat_id = chat_id.0, data = %data, "Keyboard button pressed");

    let screen = dialogs.handle(UserId(chat_id.0), Input::Button(data)).await;
    send_screen(&bot, chat_id, screen).await
}

async fn send_screen(bot: &Bot, chat_id: ChatId, screen: Screen) -> ResponseResult<()> {
    bot.send_message(chat_id, screen.text)
        .reply_markup(keyboard_markup(&screen.keyboard))
        .await?;
    Ok(())
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
