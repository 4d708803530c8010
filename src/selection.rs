//! # Selection State Module
//!
//! Holds the three option flags shown on the selection keyboard and the
//! store that hands them out to handlers.
//!
//! The store is guarded by a mutex, so a toggle is always an atomic
//! read-modify-write even when the dispatcher runs handlers for different
//! chats concurrently. Whether chats share one set of flags or get their own
//! is decided by [`SelectionScope`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use teloxide::types::ChatId;

/// Number of toggleable options on the keyboard
pub const OPTION_COUNT: usize = 3;

/// One of the three toggleable options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionSlot {
    First,
    Second,
    Third,
}

impl OptionSlot {
    /// All slots in display order
    pub const ALL: [OptionSlot; OPTION_COUNT] =
        [OptionSlot::First, OptionSlot::Second, OptionSlot::Third];

    /// Zero-based position of the slot
    pub fn index(self) -> usize {
        match self {
            OptionSlot::First => 0,
            OptionSlot::Second => 1,
            OptionSlot::Third => 2,
        }
    }

    /// One-based number used in labels and callback data
    pub fn number(self) -> usize {
        self.index() + 1
    }

    /// Slot for a zero-based index, `None` when out of range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// The three option flags, all unselected by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OptionState {
    flags: [bool; OPTION_COUNT],
}

impl OptionState {
    pub fn new(flags: [bool; OPTION_COUNT]) -> Self {
        Self { flags }
    }

    /// Flip the flag of a single slot
    pub fn toggle(&mut self, slot: OptionSlot) {
        let flag = &mut self.flags[slot.index()];
        *flag = !*flag;
    }

    pub fn is_selected(&self, slot: OptionSlot) -> bool {
        self.flags[slot.index()]
    }

    /// Copy of the flags in slot order
    pub fn snapshot(&self) -> [bool; OPTION_COUNT] {
        self.flags
    }
}

/// Renders the flags as `[true false true]`
impl fmt::Display for OptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, flag) in self.flags.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{flag}")?;
        }
        write!(f, "]")
    }
}

/// Who shares a set of option flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionScope {
    /// One set of flags for the whole process; every chat sees every toggle
    #[default]
    Global,
    /// Each chat keeps its own flags
    PerChat,
}

impl SelectionScope {
    /// Parse the value of the `SELECTION_SCOPE` setting
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "global" => Some(SelectionScope::Global),
            "chat" | "per_chat" | "per-chat" => Some(SelectionScope::PerChat),
            _ => None,
        }
    }
}

impl fmt::Display for SelectionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionScope::Global => write!(f, "global"),
            SelectionScope::PerChat => write!(f, "chat"),
        }
    }
}

/// Mutex-guarded option flags, keyed according to the configured scope
#[derive(Debug, Default)]
pub struct SelectionStore {
    scope: SelectionScope,
    states: Mutex<HashMap<Option<ChatId>, OptionState>>,
}

impl SelectionStore {
    pub fn new(scope: SelectionScope) -> Self {
        Self {
            scope,
            states: Mutex::new(HashMap::new()),
        }
    }

    pub fn scope(&self) -> SelectionScope {
        self.scope
    }

    fn key(&self, chat_id: ChatId) -> Option<ChatId> {
        match self.scope {
            SelectionScope::Global => None,
            SelectionScope::PerChat => Some(chat_id),
        }
    }

    /// Current flags as seen from `chat_id`
    pub fn snapshot(&self, chat_id: ChatId) -> OptionState {
        let key = self.key(chat_id);
        let states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        states.get(&key).copied().unwrap_or_default()
    }

    /// Flip one flag and return the flags after the flip
    pub fn toggle(&self, chat_id: ChatId, slot: OptionSlot) -> OptionState {
        let key = self.key(chat_id);
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        let state = states.entry(key).or_default();
        state.toggle(slot);
        *state
    }
}
