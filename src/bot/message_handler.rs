//! Message Handler module for the `/start` command

use teloxide::types::{ChatId, Message, Update, UpdateKind};
use tracing::{debug, error, info};

use crate::localization::t_lang;
use crate::selection::SelectionStore;

use super::chat_client::ChatClient;
use super::ui_builder::create_selection_keyboard;

const START_COMMAND: &str = "start";

/// A `/start` request that carried a message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    pub chat_id: ChatId,
    pub language_code: Option<String>,
}

impl StartRequest {
    pub fn from_message(msg: &Message) -> Self {
        Self {
            chat_id: msg.chat.id,
            language_code: msg
                .from
                .as_ref()
                .and_then(|user| user.language_code.clone()),
        }
    }
}

/// Whether `text` is the start command (`/start`, `/start@bot`, `/start args`)
pub fn is_start_command(text: &str) -> bool {
    let Some(command) = text.split_whitespace().next() else {
        return false;
    };
    let Some(command) = command.strip_prefix('/') else {
        return false;
    };
    let name = command.split('@').next().unwrap_or(command);
    name == START_COMMAND
}

/// Whether an update carries the start command, with or without a usable message
pub fn is_start_update(update: &Update) -> bool {
    match &update.kind {
        UpdateKind::Message(msg) | UpdateKind::EditedMessage(msg) => {
            msg.text().is_some_and(is_start_command)
        }
        _ => false,
    }
}

/// The start request of an update, `None` when there is no new message body
pub fn start_request(update: &Update) -> Option<StartRequest> {
    match &update.kind {
        UpdateKind::Message(msg) => Some(StartRequest::from_message(msg)),
        _ => None,
    }
}

/// Handle the `/start` command by sending the selection keyboard
///
/// Never fails: a missing message body is logged and send errors are swallowed.
pub async fn handle_start<C: ChatClient + ?Sized>(
    client: &C,
    store: &SelectionStore,
    request: Option<StartRequest>,
) {
    let Some(request) = request else {
        error!("Start command arrived without a message");
        return;
    };

    debug!(chat_id = %request.chat_id, "Received start command");

    let state = store.snapshot(request.chat_id);
    let keyboard = create_selection_keyboard(&state);
    let greeting = t_lang("start-greeting", request.language_code.as_deref());

    match client
        .send_text(request.chat_id, greeting, Some(keyboard))
        .await
    {
        Ok(()) => info!(chat_id = %request.chat_id, "Selection keyboard sent"),
        Err(e) => error!(chat_id = %request.chat_id, error = %e, "Failed to send selection keyboard"),
    }
}
