use serde::{Deserialize, Serialize};

use super::selection::CellPosition;
use crate::cell::{CellInput, CellType};
use crate::infer::parse_lenient_number;

/// What the user is currently doing with the grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum EditMode {
    /// Not editing, just viewing the table
    #[default]
    Viewing,
    /// Editing a cell in place
    #[serde(rename_all = "camelCase")]
    CellEditing {
        position: CellPosition,
        content: String,
        /// Character whose keypress opened the editor
        seed: Option<char>,
    },
}

impl EditMode {
    pub fn is_viewing(&self) -> bool {
        matches!(self, EditMode::Viewing)
    }

    pub fn is_editing(&self) -> bool {
        !self.is_viewing()
    }

    pub fn get_content(&self) -> Option<&str> {
        match self {
            EditMode::Viewing => None,
            EditMode::CellEditing { content, .. } => Some(content),
        }
    }

    pub fn get_position(&self) -> Option<CellPosition> {
        match self {
            EditMode::Viewing => None,
            EditMode::CellEditing { position, .. } => Some(*position),
        }
    }

    pub fn get_seed(&self) -> Option<char> {
        match self {
            EditMode::Viewing => None,
            EditMode::CellEditing { seed, .. } => *seed,
        }
    }
}

/// Edit buffer of the one cell being edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditState {
    mode: EditMode,
}

impl Default for EditState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditState {
    pub fn new() -> Self {
        Self {
            mode: EditMode::Viewing,
        }
    }

    /// Start editing with the cell's current value in the buffer
    pub fn start_cell_edit(&mut self, position: CellPosition, initial_content: String) {
        self.mode = EditMode::CellEditing {
            position,
            content: initial_content,
            seed: None,
        };
    }

    /// Start editing with only the typed character in the buffer
    pub fn start_seeded_edit(&mut self, position: CellPosition, seed: char) {
        self.mode = EditMode::CellEditing {
            position,
            content: seed.to_string(),
            seed: Some(seed),
        };
    }

    /// Replace the buffer. Returns false when nothing is being edited.
    pub fn update_value(&mut self, new_content: String) -> bool {
        match &mut self.mode {
            EditMode::Viewing => false,
            EditMode::CellEditing { content, .. } => {
                *content = new_content;
                true
            }
        }
    }

    pub fn push_char(&mut self, c: char) -> bool {
        match &mut self.mode {
            EditMode::Viewing => false,
            EditMode::CellEditing { content, .. } => {
                content.push(c);
                true
            }
        }
    }

    pub fn pop_char(&mut self) -> bool {
        match &mut self.mode {
            EditMode::Viewing => false,
            EditMode::CellEditing { content, .. } => content.pop().is_some(),
        }
    }

    /// End the edit and hand back the buffer for committing
    pub fn commit(&mut self) -> Option<(CellPosition, String)> {
        match std::mem::take(&mut self.mode) {
            EditMode::Viewing => None,
            EditMode::CellEditing {
                position, content, ..
            } => Some((position, content)),
        }
    }

    /// End the edit, discarding the buffer. Returns false when nothing was
    /// being edited.
    pub fn cancel(&mut self) -> bool {
        let was_editing = self.mode.is_editing();
        self.mode = EditMode::Viewing;
        was_editing
    }

    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }

    pub fn is_editing_at(&self, pos: CellPosition) -> bool {
        self.mode.get_position() == Some(pos)
    }

    pub fn current_content(&self) -> Option<&str> {
        self.mode.get_content()
    }

    pub fn editing_position(&self) -> Option<CellPosition> {
        self.mode.get_position()
    }

    pub fn seed(&self) -> Option<char> {
        self.mode.get_seed()
    }
}

/// Parse a committed edit buffer according to the cell's type.
///
/// Numeric types take the lenient parse and keep the raw string when it
/// fails; text and date keep the raw string.
pub fn commit_value(cell_type: CellType, raw: &str) -> CellInput {
    if cell_type.is_numeric() {
        if let Some(n) = parse_lenient_number(raw) {
            return CellInput::Number(n);
        }
    }
    CellInput::Text(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(content: &str) -> EditMode {
        EditMode::CellEditing {
            position: CellPosition::origin(),
            content: content.to_string(),
            seed: None,
        }
    }

    #[test]
    fn test_edit_mode_default() {
        assert_eq!(EditMode::default(), EditMode::Viewing);
    }

    #[test]
    fn test_edit_mode_is_editing() {
        assert!(EditMode::Viewing.is_viewing());
        assert!(!EditMode::Viewing.is_editing());
        assert!(editing("").is_editing());
    }

    #[test]
    fn test_edit_mode_accessors() {
        assert_eq!(EditMode::Viewing.get_content(), None);
        assert_eq!(EditMode::Viewing.get_position(), None);
        assert_eq!(editing("abc").get_content(), Some("abc"));
        assert_eq!(editing("abc").get_position(), Some(CellPosition::origin()));
        assert_eq!(editing("abc").get_seed(), None);
    }

    #[test]
    fn test_edit_state_new() {
        let state = EditState::new();
        assert!(!state.is_editing());
        assert_eq!(state.current_content(), None);
        assert_eq!(state.editing_position(), None);
        assert_eq!(state, EditState::default());
    }

    #[test]
    fn test_start_cell_edit() {
        let mut state = EditState::new();
        let pos = CellPosition::new(2, 3);
        state.start_cell_edit(pos, "hello".to_string());

        assert!(state.is_editing());
        assert!(state.is_editing_at(pos));
        assert_eq!(state.current_content(), Some("hello"));
        assert_eq!(state.seed(), None);
    }

    #[test]
    fn test_start_seeded_edit_ignores_prior_value() {
        let mut state = EditState::new();
        let pos = CellPosition::new(1, 1);
        state.start_cell_edit(pos, "old value".to_string());
        state.start_seeded_edit(pos, '7');

        assert_eq!(state.current_content(), Some("7"));
        assert_eq!(state.seed(), Some('7'));
    }

    #[test]
    fn test_update_value() {
        let mut state = EditState::new();
        assert!(!state.update_value("x".to_string()));

        state.start_cell_edit(CellPosition::origin(), String::new());
        assert!(state.update_value("new".to_string()));
        assert_eq!(state.current_content(), Some("new"));
    }

    #[test]
    fn test_push_and_pop_char() {
        let mut state = EditState::new();
        assert!(!state.push_char('a'));

        state.start_seeded_edit(CellPosition::origin(), '1');
        assert!(state.push_char('2'));
        assert_eq!(state.current_content(), Some("12"));
        assert!(state.pop_char());
        assert!(state.pop_char());
        assert!(!state.pop_char());
        assert_eq!(state.current_content(), Some(""));
    }

    #[test]
    fn test_commit() {
        let mut state = EditState::new();
        let pos = CellPosition::new(4, 0);
        state.start_cell_edit(pos, "old".to_string());
        state.update_value("new".to_string());

        assert_eq!(state.commit(), Some((pos, "new".to_string())));
        assert!(!state.is_editing());
        assert_eq!(state.commit(), None);
    }

    #[test]
    fn test_cancel() {
        let mut state = EditState::new();
        assert!(!state.cancel());

        state.start_cell_edit(CellPosition::origin(), "original".to_string());
        state.update_value("changed".to_string());
        assert!(state.cancel());
        assert!(!state.is_editing());
        assert_eq!(state.current_content(), None);
    }

    #[test]
    fn test_commit_value_numeric() {
        assert_eq!(commit_value(CellType::Number, "42"), CellInput::Number(42.0));
        assert_eq!(
            commit_value(CellType::Currency, "$1,000.25"),
            CellInput::Number(1000.25)
        );
        assert_eq!(commit_value(CellType::Percentage, "45%"), CellInput::Number(45.0));
    }

    #[test]
    fn test_commit_value_numeric_failure_keeps_string() {
        assert_eq!(
            commit_value(CellType::Number, "abc"),
            CellInput::Text("abc".to_string())
        );
        assert_eq!(commit_value(CellType::Currency, ""), CellInput::Text(String::new()));
    }

    #[test]
    fn test_commit_value_text_and_date_raw() {
        assert_eq!(
            commit_value(CellType::Text, " 42 "),
            CellInput::Text(" 42 ".to_string())
        );
        assert_eq!(
            commit_value(CellType::Date, "2024-01-01"),
            CellInput::Text("2024-01-01".to_string())
        );
    }

    #[test]
    fn test_serialization() {
        let mut state = EditState::new();
        state.start_seeded_edit(CellPosition::new(1, 2), 'x');
        let json = serde_json::to_string(&state).unwrap();
        let back: EditState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
