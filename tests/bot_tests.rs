use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId};

use option_picker_bot::bot::ui_builder::{CHECK_GLYPH, CROSS_GLYPH};
use option_picker_bot::bot::{
    create_selection_keyboard, handle_callback, handle_start, CallbackEvent, ChatClient,
    StartRequest,
};
use option_picker_bot::selection::{OptionSlot, OptionState, SelectionScope, SelectionStore};

#[cfg(test)]
mod tests {
    use super::*;

    /// Outbound call seen by the recording client
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Send {
            chat_id: ChatId,
            text: String,
            keyboard: Option<InlineKeyboardMarkup>,
        },
        Edit {
            chat_id: ChatId,
            message_id: MessageId,
            keyboard: InlineKeyboardMarkup,
        },
        Delete {
            chat_id: ChatId,
            message_id: MessageId,
        },
        Answer {
            callback_id: String,
        },
    }

    /// Chat client that records every call and always succeeds
    #[derive(Default)]
    struct RecordingClient {
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingClient {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn clear(&self) {
            self.calls.lock().unwrap().clear();
        }
    }

    #[async_trait]
    impl ChatClient for RecordingClient {
        async fn send_text(
            &self,
            chat_id: ChatId,
            text: String,
            keyboard: Option<InlineKeyboardMarkup>,
        ) -> Result<()> {
            self.record(Call::Send {
                chat_id,
                text,
                keyboard,
            });
            Ok(())
        }

        async fn edit_keyboard(
            &self,
            chat_id: ChatId,
            message_id: MessageId,
            keyboard: InlineKeyboardMarkup,
        ) -> Result<()> {
            self.record(Call::Edit {
                chat_id,
                message_id,
                keyboard,
            });
            Ok(())
        }

        async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
            self.record(Call::Delete {
                chat_id,
                message_id,
            });
            Ok(())
        }

        async fn answer_callback(&self, callback_id: String) -> Result<()> {
            self.record(Call::Answer { callback_id });
            Ok(())
        }
    }

    const CHAT: ChatId = ChatId(1001);
    const KEYBOARD_MESSAGE: MessageId = MessageId(77);

    fn press(chat_id: ChatId, data: &str) -> CallbackEvent {
        CallbackEvent {
            id: format!("query-{data}"),
            data: data.to_string(),
            chat_id,
            message_id: Some(KEYBOARD_MESSAGE),
            language_code: Some("en".to_string()),
        }
    }

    fn start(chat_id: ChatId) -> Option<StartRequest> {
        Some(StartRequest {
            chat_id,
            language_code: Some("en".to_string()),
        })
    }

    /// Test that a fresh /start sends one keyboard with three crossed toggles
    #[tokio::test]
    async fn test_start_on_fresh_process() {
        let store = SelectionStore::new(SelectionScope::Global);
        let client = RecordingClient::default();

        handle_start(&client, &store, start(CHAT)).await;

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        let Call::Send {
            chat_id,
            keyboard: Some(keyboard),
            ..
        } = &calls[0]
        else {
            panic!("Expected a message with a keyboard, got {:?}", calls[0]);
        };
        assert_eq!(*chat_id, CHAT);

        let buttons: Vec<_> = keyboard.inline_keyboard.iter().flatten().collect();
        assert_eq!(buttons.len(), 4);
        for button in &buttons[..3] {
            assert!(button.text.starts_with(CROSS_GLYPH));
        }
        assert_eq!(buttons[3].text, "Select");

        assert_eq!(store.snapshot(CHAT), OptionState::default());
    }

    /// Test that /start without a message body makes no outbound calls
    #[tokio::test]
    async fn test_start_without_message_body() {
        let store = SelectionStore::new(SelectionScope::Global);
        let client = RecordingClient::default();

        handle_start(&client, &store, None).await;

        assert!(client.calls().is_empty());
    }

    /// Test the toggle flow: acknowledge first, then edit the keyboard in place
    #[tokio::test]
    async fn test_toggle_updates_keyboard_in_place() {
        let store = SelectionStore::new(SelectionScope::Global);
        let client = RecordingClient::default();

        handle_callback(&client, &store, press(CHAT, "btn_opt1")).await;

        let expected = create_selection_keyboard(&OptionState::new([true, false, false]));
        assert_eq!(
            client.calls(),
            vec![
                Call::Answer {
                    callback_id: "query-btn_opt1".to_string()
                },
                Call::Edit {
                    chat_id: CHAT,
                    message_id: KEYBOARD_MESSAGE,
                    keyboard: expected,
                },
            ]
        );
        assert!(client.calls().iter().all(|call| !matches!(call, Call::Send { .. })));
    }

    /// Test that pressing a toggle twice restores state and rendering
    #[tokio::test]
    async fn test_double_toggle_is_idempotent() {
        let store = SelectionStore::new(SelectionScope::Global);
        let client = RecordingClient::default();
        let before = create_selection_keyboard(&store.snapshot(CHAT));

        handle_callback(&client, &store, press(CHAT, "btn_opt2")).await;
        handle_callback(&client, &store, press(CHAT, "btn_opt2")).await;

        assert_eq!(store.snapshot(CHAT), OptionState::default());
        let last_edit = client
            .calls()
            .into_iter()
            .rev()
            .find_map(|call| match call {
                Call::Edit { keyboard, .. } => Some(keyboard),
                _ => None,
            })
            .expect("keyboard should have been edited");
        assert_eq!(last_edit, before);
    }

    /// Test the select flow from [false, false, true]
    #[tokio::test]
    async fn test_select_reports_selection() {
        let store = SelectionStore::new(SelectionScope::Global);
        let client = RecordingClient::default();

        handle_callback(&client, &store, press(CHAT, "btn_opt3")).await;
        client.clear();

        handle_callback(&client, &store, press(CHAT, "btn_select")).await;

        assert_eq!(
            client.calls(),
            vec![
                Call::Answer {
                    callback_id: "query-btn_select".to_string()
                },
                Call::Delete {
                    chat_id: CHAT,
                    message_id: KEYBOARD_MESSAGE,
                },
                Call::Send {
                    chat_id: CHAT,
                    text: "Selected options: [false false true]".to_string(),
                    keyboard: None,
                },
            ]
        );
    }

    /// Unknown `btn_` data keeps the state and re-renders it unchanged.
    /// Whether this should be rejected instead is an open question; this
    /// test pins the current behavior.
    #[tokio::test]
    async fn test_unknown_callback_data_rerenders_unchanged_state() {
        let store = SelectionStore::new(SelectionScope::Global);
        store.toggle(CHAT, OptionSlot::First);
        let client = RecordingClient::default();

        handle_callback(&client, &store, press(CHAT, "btn_bogus")).await;

        assert_eq!(store.snapshot(CHAT).snapshot(), [true, false, false]);
        let edits: Vec<_> = client
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Edit { keyboard, .. } => Some(keyboard),
                _ => None,
            })
            .collect();
        assert_eq!(edits.len(), 1);
        assert!(edits[0].inline_keyboard[0][0].text.starts_with(CHECK_GLYPH));
    }

    /// Global scope: a toggle in one chat shows up in another chat's keyboard
    #[tokio::test]
    async fn test_global_scope_is_shared_across_chats() {
        let store = SelectionStore::new(SelectionScope::Global);
        let client = RecordingClient::default();

        handle_callback(&client, &store, press(ChatId(1), "btn_opt1")).await;
        client.clear();
        handle_start(&client, &store, start(ChatId(2))).await;

        let calls = client.calls();
        let Call::Send {
            keyboard: Some(keyboard),
            ..
        } = &calls[0]
        else {
            panic!("Expected a keyboard message");
        };
        assert!(keyboard.inline_keyboard[0][0].text.starts_with(CHECK_GLYPH));
    }

    /// Per-chat scope: each chat reports only its own toggles
    #[tokio::test]
    async fn test_per_chat_scope_reports_own_selection() {
        let store = SelectionStore::new(SelectionScope::PerChat);
        let client = RecordingClient::default();

        handle_callback(&client, &store, press(ChatId(1), "btn_opt1")).await;
        handle_callback(&client, &store, press(ChatId(2), "btn_opt2")).await;
        client.clear();

        handle_callback(&client, &store, press(ChatId(2), "btn_select")).await;

        assert!(client.calls().contains(&Call::Send {
            chat_id: ChatId(2),
            text: "Selected options: [false true false]".to_string(),
            keyboard: None,
        }));
    }

    /// Concurrent presses from many chats never lose a toggle
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_presses_keep_every_toggle() {
        let store = std::sync::Arc::new(SelectionStore::new(SelectionScope::Global));
        let client = std::sync::Arc::new(RecordingClient::default());

        let tasks: Vec<_> = (0..31)
            .map(|i| {
                let store = store.clone();
                let client = client.clone();
                tokio::spawn(async move {
                    handle_callback(client.as_ref(), &store, press(ChatId(i), "btn_opt1")).await;
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        // 31 flips starting from false
        assert!(store.snapshot(CHAT).is_selected(OptionSlot::First));
    }
}
