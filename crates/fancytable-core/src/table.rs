use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::cell::{Cell, CellInput};
use crate::config::EditorConfig;
use crate::infer::infer_cell_with_currency;
use crate::range::header_labels;
use crate::theme::Theme;

/// One table row; column identity is the cell's position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: Uuid,
    pub cells: Vec<Cell>,
}

impl Row {
    /// A row of `width` empty text cells
    pub fn empty(width: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            cells: (0..width).map(|_| Cell::empty()).collect(),
        }
    }
}

/// The canonical in-memory table.
///
/// Every row holds exactly `column_count` cells and `column_count >= 1`;
/// all mutators preserve this.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: Uuid,
    pub name: String,
    rows: Vec<Row>,
    column_count: usize,
    pub theme: Theme,
}

impl Table {
    /// Starter grid (10 rows x 8 columns) of empty text cells
    pub fn blank(name: impl Into<String>) -> Self {
        let config = EditorConfig::default();
        Self::blank_sized(
            name,
            config.blank_rows,
            config.blank_columns,
            config.default_theme(),
        )
    }

    /// Starter grid shaped by the editor configuration
    pub fn blank_with(config: &EditorConfig, name: impl Into<String>) -> Self {
        Self::blank_sized(
            name,
            config.blank_rows,
            config.blank_columns,
            config.default_theme(),
        )
    }

    pub fn blank_sized(name: impl Into<String>, rows: usize, columns: usize, theme: Theme) -> Self {
        let columns = columns.max(1);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rows: (0..rows).map(|_| Row::empty(columns)).collect(),
            column_count: columns,
            theme,
        }
    }

    /// Build a table from raw imported rows using the default configuration
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>], name: impl Into<String>) -> Self {
        Self::from_rows_with(&EditorConfig::default(), rows, name)
    }

    /// Build a table from raw imported rows.
    ///
    /// Each cell goes through type inference and ragged rows are padded with
    /// empty text cells to the widest row. Input without any cells yields the
    /// blank template instead.
    pub fn from_rows_with<S: AsRef<str>>(
        config: &EditorConfig,
        rows: &[Vec<S>],
        name: impl Into<String>,
    ) -> Self {
        let max_columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if max_columns == 0 {
            return Self::blank_with(config, name);
        }

        let rows: Vec<Row> = rows
            .iter()
            .map(|raw_row| {
                let cells = (0..max_columns)
                    .map(|col| match raw_row.get(col) {
                        Some(raw) => infer_cell_with_currency(raw.as_ref(), &config.default_currency),
                        None => Cell::empty(),
                    })
                    .collect();
                Row {
                    id: Uuid::new_v4(),
                    cells,
                }
            })
            .collect();

        debug!(rows = rows.len(), columns = max_columns, "built table from rows");

        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rows,
            column_count: max_columns,
            theme: config.default_theme(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a reference to the cell at the given position
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Header labels A, B, C, ... for every column
    pub fn header_labels(&self) -> Vec<String> {
        header_labels(self.column_count)
    }

    /// Replace one cell's value, keeping its type. Returns false (and leaves
    /// the table untouched) when the position is out of bounds.
    pub fn set_cell_value(&mut self, row: usize, col: usize, value: impl Into<CellInput>) -> bool {
        let Some(cell) = self.rows.get_mut(row).and_then(|r| r.cells.get_mut(col)) else {
            return false;
        };
        cell.value.replace(value.into());
        debug!(row, col, "set cell value");
        true
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Append a row of empty text cells
    pub fn add_row(&mut self) {
        self.rows.push(Row::empty(self.column_count));
        debug!(rows = self.rows.len(), "added row");
    }

    /// Append an empty text cell to every row
    pub fn add_column(&mut self) {
        for row in &mut self.rows {
            row.cells.push(Cell::empty());
        }
        self.column_count += 1;
        debug!(columns = self.column_count, "added column");
    }

    /// Delete the row at `index`. The table may become empty.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        debug!(index, rows = self.rows.len(), "removed row");
        true
    }

    /// Delete the column at `index` from every row. The last remaining
    /// column is never removed.
    pub fn remove_column(&mut self, index: usize) -> bool {
        if index >= self.column_count || self.column_count <= 1 {
            return false;
        }
        for row in &mut self.rows {
            row.cells.remove(index);
        }
        self.column_count -= 1;
        debug!(index, columns = self.column_count, "removed column");
        true
    }

    /// Pad or truncate rows so every row matches `column_count`
    fn normalize(&mut self) {
        self.column_count = self.column_count.max(1);
        for row in &mut self.rows {
            row.cells.resize_with(self.column_count, Cell::empty);
        }
    }
}

// Custom Deserialize implementation to re-establish the row width invariant
impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct TableHelper {
            id: Uuid,
            name: String,
            rows: Vec<Row>,
            column_count: usize,
            #[serde(default)]
            theme: Theme,
        }

        let helper = TableHelper::deserialize(deserializer)?;

        let mut table = Table {
            id: helper.id,
            name: helper.name,
            rows: helper.rows,
            column_count: helper.column_count,
            theme: helper.theme,
        };
        table.normalize();

        Ok(table)
    }
}
