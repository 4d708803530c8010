//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles the `/start` command
//! - `callback_handler`: Handles selection keyboard callback queries
//! - `callback_data`: Decodes button callback data into actions
//! - `ui_builder`: Creates the keyboard and formats the selection report
//! - `chat_client`: Outbound Telegram calls used by the handlers
//! - `dispatcher`: Routes updates to the handlers

pub mod callback_data;
pub mod callback_handler;
pub mod chat_client;
pub mod dispatcher;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::{handle_callback, CallbackEvent};
pub use dispatcher::schema;
pub use message_handler::{handle_start, StartRequest};

// Re-export utility functions that might be used elsewhere
pub use callback_data::CallbackAction;
pub use chat_client::{ChatClient, TelegramClient};
pub use ui_builder::{create_selection_keyboard, format_selection_report};
