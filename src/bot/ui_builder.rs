//! UI Builder module for creating the selection keyboard and report text

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::localization::t_args_lang;
use crate::selection::{OptionSlot, OptionState};

use super::callback_data::CallbackAction;

pub const CHECK_GLYPH: &str = "✅";
pub const CROSS_GLYPH: &str = "❌";
pub const SELECT_LABEL: &str = "Select";

/// Label of a toggle button, prefixed by the glyph for its flag
pub fn option_button_text(slot: OptionSlot, selected: bool) -> String {
    let glyph = if selected { CHECK_GLYPH } else { CROSS_GLYPH };
    format!("{} Option {}", glyph, slot.number())
}

/// Create the inline keyboard for the current option flags
///
/// Row 1 holds one toggle button per option, row 2 the Select button.
pub fn create_selection_keyboard(state: &OptionState) -> InlineKeyboardMarkup {
    let toggles = OptionSlot::ALL
        .iter()
        .map(|&slot| {
            InlineKeyboardButton::callback(
                option_button_text(slot, state.is_selected(slot)),
                CallbackAction::Toggle(slot).encode(),
            )
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(vec![
        toggles,
        vec![InlineKeyboardButton::callback(
            SELECT_LABEL,
            CallbackAction::Select.encode(),
        )],
    ])
}

/// Format the final report sent after Select
pub fn format_selection_report(state: &OptionState, language_code: Option<&str>) -> String {
    let options = state.to_string();
    t_args_lang("selected-options", &[("options", options.as_str())], language_code)
}
