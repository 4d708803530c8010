//! Callback Handler module for processing selection keyboard button presses

use teloxide::types::{CallbackQuery, ChatId, MessageId};
use tracing::{debug, error, info, warn};

use crate::selection::SelectionStore;

use super::callback_data::CallbackAction;
use super::chat_client::ChatClient;
use super::ui_builder::{create_selection_keyboard, format_selection_report};

/// A button press on the selection keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackEvent {
    /// Callback query id, used for the acknowledgement
    pub id: String,
    pub data: String,
    /// Chat of the keyboard message, or the presser's private chat
    pub chat_id: ChatId,
    /// Keyboard message, `None` when Telegram no longer exposes it
    pub message_id: Option<MessageId>,
    pub language_code: Option<String>,
}

impl CallbackEvent {
    pub fn from_query(q: &CallbackQuery) -> Self {
        let (chat_id, message_id) = match &q.message {
            Some(msg) => (msg.chat().id, Some(msg.id())),
            None => (ChatId::from(q.from.id), None),
        };

        Self {
            id: q.id.0.clone(),
            data: q.data.clone().unwrap_or_default(),
            chat_id,
            message_id,
            language_code: q.from.language_code.clone(),
        }
    }
}

/// Handle a press on the selection keyboard
///
/// Acknowledges the press first, then toggles and re-renders the keyboard, or
/// on Select replaces the keyboard message with the selection report.
/// Never fails: every outbound error is logged and swallowed here.
pub async fn handle_callback<C: ChatClient + ?Sized>(
    client: &C,
    store: &SelectionStore,
    event: CallbackEvent,
) {
    debug!(chat_id = %event.chat_id, data = %event.data, "Received callback query");

    if let Err(e) = client.answer_callback(event.id.clone()).await {
        warn!(chat_id = %event.chat_id, error = %e, "Failed to answer callback query");
    }

    let Some(action) = CallbackAction::decode(&event.data) else {
        warn!(chat_id = %event.chat_id, data = %event.data, "Ignoring callback without keyboard prefix");
        return;
    };

    match action {
        CallbackAction::Toggle(slot) => {
            let state = store.toggle(event.chat_id, slot);
            debug!(chat_id = %event.chat_id, option = slot.number(), state = %state, "Option toggled");
        }
        CallbackAction::Select => {
            finish_selection(client, store, &event).await;
            return;
        }
        CallbackAction::Unrecognized(data) => {
            // Re-render the unchanged keyboard, as for a toggle
            warn!(chat_id = %event.chat_id, data = %data, "Unrecognized keyboard callback");
        }
    }

    let Some(message_id) = event.message_id else {
        debug!(chat_id = %event.chat_id, "Keyboard message not accessible, skipping re-render");
        return;
    };

    let keyboard = create_selection_keyboard(&store.snapshot(event.chat_id));
    if let Err(e) = client.edit_keyboard(event.chat_id, message_id, keyboard).await {
        error!(chat_id = %event.chat_id, error = %e, "Failed to update selection keyboard");
    }
}

/// Delete the keyboard message and report the final selection
async fn finish_selection<C: ChatClient + ?Sized>(
    client: &C,
    store: &SelectionStore,
    event: &CallbackEvent,
) {
    let Some(message_id) = event.message_id else {
        debug!(chat_id = %event.chat_id, "Keyboard message not accessible, nothing to finish");
        return;
    };

    if let Err(e) = client.delete_message(event.chat_id, message_id).await {
        debug!(chat_id = %event.chat_id, error = %e, "Failed to delete keyboard message");
        return;
    }

    let state = store.snapshot(event.chat_id);
    let report = format_selection_report(&state, event.language_code.as_deref());
    match client.send_text(event.chat_id, report, None).await {
        Ok(()) => info!(chat_id = %event.chat_id, state = %state, "Selection reported"),
        Err(e) => error!(chat_id = %event.chat_id, error = %e, "Failed to send selection report"),
    }
}
