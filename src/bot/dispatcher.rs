//! Update routing: `/start` to the message handler, `btn_` callbacks to the
//! callback handler. Everything else is left to the default handler.

use std::sync::Arc;

use anyhow::Result;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::selection::SelectionStore;

use super::callback_data::is_selection_callback;
use super::callback_handler::{handle_callback, CallbackEvent};
use super::chat_client::TelegramClient;
use super::message_handler::{handle_start, is_start_update, start_request};

/// Handler tree for the dispatcher; expects an `Arc<SelectionStore>` dependency
pub fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(dptree::filter(|update: Update| is_start_update(&update)).endpoint(start_endpoint))
        .branch(
            Update::filter_callback_query()
                .filter(|q: CallbackQuery| is_selection_callback(q.data.as_deref()))
                .endpoint(callback_endpoint),
        )
}

async fn start_endpoint(bot: Bot, store: Arc<SelectionStore>, update: Update) -> Result<()> {
    let client = TelegramClient::new(bot);
    handle_start(&client, &store, start_request(&update)).await;
    Ok(())
}

async fn callback_endpoint(bot: Bot, store: Arc<SelectionStore>, q: CallbackQuery) -> Result<()> {
    let client = TelegramClient::new(bot);
    handle_callback(&client, &store, CallbackEvent::from_query(&q)).await;
    Ok(())
}
