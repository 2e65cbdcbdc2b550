use serde::{Deserialize, Serialize};

use super::selection::CellPosition;

/// Every user input the grid reacts to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum InputAction {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Editing
    ConfirmEdit,
    CancelEdit,
    Delete,
    Backspace,
    InsertChar(char),
    UpdateBuffer(String),

    // Pointer and focus
    Click(CellPosition),
    DoubleClick(CellPosition),
    Blur,

    // Unknown/unmapped
    None,
}

/// Key codes for the keys the grid understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Special keys
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,

    // Character key
    Char(char),

    // Unknown
    Unknown,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Escape" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unknown,
                }
            }
        }
    }
}

/// Modifier keys state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    pub fn with_alt(mut self, alt: bool) -> Self {
        self.alt = alt;
        self
    }

    pub fn with_meta(mut self, meta: bool) -> Self {
        self.meta = meta;
        self
    }

    /// Shift alone still types a character
    pub fn allows_typing(&self) -> bool {
        !self.ctrl && !self.alt && !self.meta
    }
}

/// Maps a key and modifiers to an InputAction
pub fn key_to_action(key: Key, modifiers: Modifiers) -> InputAction {
    match key {
        Key::ArrowUp => InputAction::MoveUp,
        Key::ArrowDown => InputAction::MoveDown,
        Key::ArrowLeft => InputAction::MoveLeft,
        Key::ArrowRight => InputAction::MoveRight,

        Key::Enter => InputAction::ConfirmEdit,
        Key::Escape => InputAction::CancelEdit,

        // Tab moves focus out of the edit input
        Key::Tab => InputAction::Blur,

        Key::Delete => InputAction::Delete,
        Key::Backspace => InputAction::Backspace,

        Key::Char(c) if modifiers.allows_typing() && !c.is_control() => InputAction::InsertChar(c),

        _ => InputAction::None,
    }
}
