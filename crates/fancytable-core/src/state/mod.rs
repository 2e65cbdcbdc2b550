pub mod edit;
pub mod input;
pub mod selection;

pub use edit::{commit_value, EditMode, EditState};
pub use input::{key_to_action, InputAction, Key, Modifiers};
pub use selection::{CellPosition, Selection};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cell::CellInput;
use crate::table::Table;

/// A value the grid wants written into the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub position: CellPosition,
    pub value: CellInput,
}

/// Coarse state of the grid: idle, one cell selected, or one cell editing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum GridPhase {
    Idle,
    Selected { position: CellPosition },
    Editing { position: CellPosition, seed: Option<char> },
}

/// Interaction state combining selection and the edit buffer.
///
/// At most one cell is ever being edited, and that cell is always the
/// selected one. Input never mutates the table directly: a finished edit is
/// returned as a [`Commit`] for the owner of the table to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    pub selection: Selection,
    pub edit: EditState,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new()
    }
}

impl GridState {
    pub fn new() -> Self {
        Self {
            selection: Selection::new(),
            edit: EditState::new(),
        }
    }

    /// Fresh state for a table; empty tables start idle
    pub fn for_table(table: &Table) -> Self {
        let mut state = Self::new();
        state.clamp_to(table);
        state
    }

    /// Handle a user input action. Returns the value to write when the
    /// action finishes an edit or clears a cell.
    pub fn handle_action(&mut self, action: InputAction, table: &Table) -> Option<Commit> {
        match action {
            InputAction::MoveUp => self.move_selection(-1, 0, table),
            InputAction::MoveDown => self.move_selection(1, 0, table),
            InputAction::MoveLeft => self.move_selection(0, -1, table),
            InputAction::MoveRight => self.move_selection(0, 1, table),

            InputAction::ConfirmEdit => {
                if self.edit.is_editing() {
                    return self.finish_edit(table);
                }
                if let Some(pos) = self.selection.active_cell() {
                    self.begin_edit(pos, table);
                }
                None
            }
            InputAction::CancelEdit => {
                if self.edit.cancel() {
                    debug!("edit cancelled");
                }
                None
            }
            InputAction::Blur => self.finish_edit(table),

            InputAction::Delete | InputAction::Backspace if !self.edit.is_editing() => {
                let pos = self.selection.active_cell()?;
                let cell = table.cell(pos.row, pos.col)?;
                debug!(row = pos.row, col = pos.col, "clearing cell");
                Some(Commit {
                    position: pos,
                    value: commit_value(cell.cell_type(), ""),
                })
            }
            InputAction::Backspace => {
                self.edit.pop_char();
                None
            }
            InputAction::Delete => None,

            InputAction::InsertChar(c) => {
                if self.edit.is_editing() {
                    self.edit.push_char(c);
                } else if let Some(pos) = self.selection.active_cell() {
                    if table.cell(pos.row, pos.col).is_some() {
                        self.edit.start_seeded_edit(pos, c);
                    }
                }
                None
            }
            InputAction::UpdateBuffer(content) => {
                self.edit.update_value(content);
                None
            }

            InputAction::Click(pos) => {
                // Any in-progress edit is discarded, not saved
                self.edit.cancel();
                self.select_clamped(pos, table);
                None
            }
            InputAction::DoubleClick(pos) => {
                self.edit.cancel();
                if let Some(pos) = self.select_clamped(pos, table) {
                    self.begin_edit(pos, table);
                }
                None
            }

            InputAction::None => None,
        }
    }

    fn move_selection(&mut self, delta_row: isize, delta_col: isize, table: &Table) -> Option<Commit> {
        // Navigation discards the edit buffer
        self.edit.cancel();

        let current = self.selection.active_cell()?;
        if let Some(new_pos) =
            current.offset_clamped(delta_row, delta_col, table.row_count(), table.column_count())
        {
            self.selection.select_cell(new_pos);
        }
        None
    }

    fn select_clamped(&mut self, pos: CellPosition, table: &Table) -> Option<CellPosition> {
        match pos.clamped(table.row_count(), table.column_count()) {
            Some(pos) => {
                self.selection.select_cell(pos);
                Some(pos)
            }
            None => {
                self.selection.clear();
                None
            }
        }
    }

    fn begin_edit(&mut self, pos: CellPosition, table: &Table) {
        if let Some(cell) = table.cell(pos.row, pos.col) {
            self.selection.select_cell(pos);
            self.edit.start_cell_edit(pos, cell.value.as_text());
        }
    }

    fn finish_edit(&mut self, table: &Table) -> Option<Commit> {
        let (position, raw) = self.edit.commit()?;
        let cell = table.cell(position.row, position.col)?;
        self.selection.select_cell(position);
        debug!(row = position.row, col = position.col, "committing edit");
        Some(Commit {
            position,
            value: commit_value(cell.cell_type(), &raw),
        })
    }

    /// Re-establish the invariants after the table changed shape
    pub fn clamp_to(&mut self, table: &Table) {
        self.selection
            .clamp_to(table.row_count(), table.column_count());

        if let Some(pos) = self.edit.editing_position() {
            if self.selection.active_cell() != Some(pos) {
                self.edit.cancel();
            }
        }
    }

    /// A row was deleted. An edit at or below it would now point at a
    /// different cell, so it is discarded.
    pub fn row_removed(&mut self, index: usize, table: &Table) {
        if self.edit.editing_position().is_some_and(|pos| pos.row >= index) {
            self.edit.cancel();
        }
        self.clamp_to(table);
    }

    /// A column was deleted. An edit at or right of it is discarded.
    pub fn column_removed(&mut self, index: usize, table: &Table) {
        if self.edit.editing_position().is_some_and(|pos| pos.col >= index) {
            self.edit.cancel();
        }
        self.clamp_to(table);
    }

    /// Back to the initial state: top-left selected, nothing editing
    pub fn reset(&mut self, table: &Table) {
        *self = Self::for_table(table);
    }

    pub fn phase(&self) -> GridPhase {
        match (self.edit.editing_position(), self.selection.active_cell()) {
            (Some(position), _) => GridPhase::Editing {
                position,
                seed: self.edit.seed(),
            },
            (None, Some(position)) => GridPhase::Selected { position },
            (None, None) => GridPhase::Idle,
        }
    }

    pub fn active_cell(&self) -> Option<CellPosition> {
        self.selection.active_cell()
    }

    pub fn is_selected(&self, pos: CellPosition) -> bool {
        self.selection.is_selected(pos)
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_editing()
    }

    pub fn is_editing_at(&self, pos: CellPosition) -> bool {
        self.edit.is_editing_at(pos)
    }

    /// The live edit buffer, if a cell is being edited
    pub fn edit_buffer(&self) -> Option<&str> {
        self.edit.current_content()
    }
}
