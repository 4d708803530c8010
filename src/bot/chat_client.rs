//! Chat Client module: the outbound calls the handlers make to Telegram
//!
//! Handlers talk to [`ChatClient`] instead of `Bot` directly so their
//! call sequences can be checked without a live Bot API.

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, InlineKeyboardMarkup, MessageId};

/// Outbound Telegram operations used by the handlers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a text message, optionally with an inline keyboard attached
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()>;

    /// Replace the inline keyboard of an existing message
    async fn edit_keyboard(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<()>;

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<()>;

    /// Acknowledge a callback query without showing an alert
    async fn answer_callback(&self, callback_id: String) -> Result<()>;
}

/// [`ChatClient`] backed by teloxide's `Bot`
#[derive(Clone)]
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatClient for TelegramClient {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        let request = self.bot.send_message(chat_id, text);
        match keyboard {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn edit_keyboard(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<()> {
        self.bot
            .edit_message_reply_markup(chat_id, message_id)
            .reply_markup(keyboard)
            .await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        self.bot.delete_message(chat_id, message_id).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: String) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id))
            .show_alert(false)
            .await?;
        Ok(())
    }
}
