use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::background::{background_style, Background, BackgroundStyle};
use crate::config::EditorConfig;
use crate::crop::{CropDrag, CropSettings, DragTarget};
use crate::error::EditorError;
use crate::format::{alignment, display_value, HorizontalAlign};
use crate::state::{key_to_action, CellPosition, GridPhase, GridState, InputAction, Key, Modifiers};
use crate::table::Table;
use crate::theme::{cell_style, find_theme, header_style, table_style, CellStyle, HeaderStyle, TableStyle, Theme};

/// Handle for one import started with [`EditorSession::begin_import`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImportTicket(pub u64);

/// Everything the host needs to render one body cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub display: String,
    pub align: HorizontalAlign,
    pub selected: bool,
    pub editing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_buffer: Option<String>,
    pub style: CellStyle,
}

/// One editor: the current table snapshot plus interaction and export state.
///
/// The session is the single writer of the table. Readers get cheap
/// `Arc` snapshots that never observe a partial update; a write clones the
/// table only while an older snapshot is still alive.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    table: Arc<Table>,
    grid: GridState,
    background: Background,
    crop: CropSettings,
    crop_drag: Option<CropDrag>,
    chrome_hidden: bool,
    latest_import: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        let table = Table::blank_with(&config, config.blank_table_name.clone());
        let grid = GridState::for_table(&table);
        Self {
            config,
            table: Arc::new(table),
            grid,
            background: Background::default(),
            crop: CropSettings::default(),
            crop_drag: None,
            chrome_hidden: false,
            latest_import: 0,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current table snapshot
    pub fn table(&self) -> Arc<Table> {
        Arc::clone(&self.table)
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn phase(&self) -> GridPhase {
        self.grid.phase()
    }

    /// Swap in a whole new table. Selection and any edit in progress are
    /// discarded, not carried over.
    pub fn replace_table(&mut self, table: Table) {
        info!(
            name = %table.name,
            rows = table.row_count(),
            columns = table.column_count(),
            "replacing table"
        );
        self.grid = GridState::for_table(&table);
        self.crop_drag = None;
        self.table = Arc::new(table);
    }

    /// Replace the table with one built from raw rows
    pub fn load_rows<S: AsRef<str>>(&mut self, rows: &[Vec<S>], name: impl Into<String>) {
        let table = Table::from_rows_with(&self.config, rows, name);
        self.replace_table(table);
    }

    /// Back to the blank starter table
    pub fn reset(&mut self) {
        let table = Table::blank_with(&self.config, self.config.blank_table_name.clone());
        self.replace_table(table);
    }

    /// Start an import. Only the most recently started import may complete.
    pub fn begin_import(&mut self) -> ImportTicket {
        self.latest_import += 1;
        debug!(ticket = self.latest_import, "import started");
        ImportTicket(self.latest_import)
    }

    /// Finish an import, replacing the table if no newer import was started
    /// in the meantime
    pub fn complete_import(&mut self, ticket: ImportTicket, table: Table) -> Result<(), EditorError> {
        if ticket.0 != self.latest_import {
            warn!(ticket = ticket.0, latest = self.latest_import, "dropping stale import");
            return Err(EditorError::StaleImport {
                ticket: ticket.0,
                latest: self.latest_import,
            });
        }
        self.replace_table(table);
        Ok(())
    }

    /// Feed one input action through the grid. Returns true when the table
    /// changed.
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        let Some(commit) = self.grid.handle_action(action, &self.table) else {
            return false;
        };
        let table = Arc::make_mut(&mut self.table);
        table.set_cell_value(commit.position.row, commit.position.col, commit.value)
    }

    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        self.handle_action(key_to_action(key, modifiers))
    }

    pub fn click(&mut self, row: usize, col: usize) {
        self.handle_action(InputAction::Click(CellPosition::new(row, col)));
    }

    pub fn double_click(&mut self, row: usize, col: usize) {
        self.handle_action(InputAction::DoubleClick(CellPosition::new(row, col)));
    }

    pub fn blur(&mut self) -> bool {
        self.handle_action(InputAction::Blur)
    }

    pub fn update_edit_buffer(&mut self, content: impl Into<String>) {
        self.handle_action(InputAction::UpdateBuffer(content.into()));
    }

    /// Switch theme by preset id
    pub fn set_theme(&mut self, theme_id: &str) -> Result<(), EditorError> {
        let theme = find_theme(theme_id)
            .cloned()
            .ok_or_else(|| EditorError::UnknownTheme(theme_id.to_string()))?;
        self.set_theme_value(theme);
        Ok(())
    }

    pub fn set_theme_value(&mut self, theme: Theme) {
        debug!(theme = %theme.id, "setting theme");
        Arc::make_mut(&mut self.table).set_theme(theme);
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        Arc::make_mut(&mut self.table).name = name.into();
    }

    pub fn add_row(&mut self) {
        Arc::make_mut(&mut self.table).add_row();
        self.grid.clamp_to(&self.table);
    }

    pub fn add_column(&mut self) {
        Arc::make_mut(&mut self.table).add_column();
        self.grid.clamp_to(&self.table);
    }

    pub fn remove_row(&mut self, index: usize) -> bool {
        if index >= self.table.row_count() {
            return false;
        }
        let removed = Arc::make_mut(&mut self.table).remove_row(index);
        self.grid.row_removed(index, &self.table);
        removed
    }

    pub fn remove_column(&mut self, index: usize) -> bool {
        if index >= self.table.column_count() || self.table.column_count() <= 1 {
            return false;
        }
        let removed = Arc::make_mut(&mut self.table).remove_column(index);
        self.grid.column_removed(index, &self.table);
        removed
    }

    /// Remove the bottom row, if any
    pub fn remove_last_row(&mut self) -> bool {
        match self.table.row_count().checked_sub(1) {
            Some(index) => self.remove_row(index),
            None => false,
        }
    }

    /// Remove the rightmost column unless it is the only one
    pub fn remove_last_column(&mut self) -> bool {
        self.remove_column(self.table.column_count().saturating_sub(1))
    }

    /// Hide selection and edit chrome, e.g. while rendering an image
    pub fn set_chrome_hidden(&mut self, hidden: bool) {
        self.chrome_hidden = hidden;
    }

    pub fn chrome_hidden(&self) -> bool {
        self.chrome_hidden
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    pub fn background_style(&self) -> BackgroundStyle {
        background_style(&self.table.theme, &self.background)
    }

    pub fn crop(&self) -> &CropSettings {
        &self.crop
    }

    pub fn set_crop(&mut self, crop: CropSettings) {
        self.crop = crop;
    }

    pub fn toggle_crop(&mut self) {
        self.crop.toggle();
        if !self.crop.enabled {
            self.crop_drag = None;
        }
    }

    pub fn apply_crop_preset(&mut self, name: &str) -> bool {
        self.crop.apply_preset(name)
    }

    /// Start a crop drag; ignored while cropping is disabled
    pub fn begin_crop_drag(&mut self, target: DragTarget, x: f64, y: f64) -> bool {
        self.crop_drag = self.crop.begin_drag(target, x, y);
        self.crop_drag.is_some()
    }

    pub fn update_crop_drag(&mut self, x: f64, y: f64) {
        if let Some(drag) = self.crop_drag {
            drag.apply(&mut self.crop, x, y);
        }
    }

    pub fn end_crop_drag(&mut self) {
        self.crop_drag = None;
    }

    pub fn table_style(&self) -> TableStyle {
        table_style(&self.table.theme)
    }

    pub fn header_style(&self) -> HeaderStyle {
        header_style(&self.table.theme)
    }

    pub fn header_labels(&self) -> Vec<String> {
        self.table.header_labels()
    }

    /// Render state of one body cell, `None` when out of bounds
    pub fn cell_view(&self, row: usize, col: usize) -> Option<CellView> {
        let cell = self.table.cell(row, col)?;
        let pos = CellPosition::new(row, col);
        let show_chrome = !self.chrome_hidden;
        let editing = show_chrome && self.grid.is_editing_at(pos);

        Some(CellView {
            display: display_value(cell),
            align: alignment(cell.cell_type()),
            selected: show_chrome && self.grid.is_selected(pos),
            editing,
            edit_buffer: if editing {
                self.grid.edit_buffer().map(str::to_string)
            } else {
                None
            },
            style: cell_style(&self.table.theme, row),
        })
    }
}
