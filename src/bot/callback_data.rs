//! Callback data decoding for the selection keyboard
//!
//! Buttons carry plain strings (`btn_opt1`, `btn_select`, ...). They are decoded
//! once into [`CallbackAction`] so the handlers can match exhaustively.

use crate::selection::OptionSlot;

/// Prefix shared by every button of the selection keyboard
pub const CALLBACK_PREFIX: &str = "btn_";

const OPTION_PREFIX: &str = "btn_opt";
const SELECT_DATA: &str = "btn_select";

/// What a button press on the selection keyboard asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Flip one option
    Toggle(OptionSlot),
    /// Finish the interaction and report the selection
    Select,
    /// Carries the keyboard prefix but nothing we know about
    Unrecognized(String),
}

impl CallbackAction {
    /// Decode callback data, `None` when it does not belong to the keyboard
    pub fn decode(data: &str) -> Option<Self> {
        if !data.starts_with(CALLBACK_PREFIX) {
            return None;
        }

        if data == SELECT_DATA {
            return Some(CallbackAction::Select);
        }

        let slot = data
            .strip_prefix(OPTION_PREFIX)
            .and_then(|number| match number {
                "1" => Some(OptionSlot::First),
                "2" => Some(OptionSlot::Second),
                "3" => Some(OptionSlot::Third),
                _ => None,
            });

        Some(match slot {
            Some(slot) => CallbackAction::Toggle(slot),
            None => CallbackAction::Unrecognized(data.to_string()),
        })
    }

    /// Callback data carried by the button for this action
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::Toggle(slot) => format!("{OPTION_PREFIX}{}", slot.number()),
            CallbackAction::Select => SELECT_DATA.to_string(),
            CallbackAction::Unrecognized(raw) => raw.clone(),
        }
    }
}

/// Whether callback data should be routed to the selection keyboard handler
pub fn is_selection_callback(data: Option<&str>) -> bool {
    data.is_some_and(|data| data.starts_with(CALLBACK_PREFIX))
}
