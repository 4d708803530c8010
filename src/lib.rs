//! # Option Picker Telegram Bot
//!
//! A Telegram bot that shows an inline keyboard with three toggleable options
//! and a Select button, then reports the final selection back to the chat.

pub mod bot;
pub mod config;
pub mod localization;
pub mod selection;
