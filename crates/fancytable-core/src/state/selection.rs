use serde::{Deserialize, Serialize};

/// A single cell position in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Step by the given delta, staying inside `rows` x `cols`.
    /// Returns `None` when the grid has no cells.
    pub fn offset_clamped(
        &self,
        delta_row: isize,
        delta_col: isize,
        rows: usize,
        cols: usize,
    ) -> Option<Self> {
        if rows == 0 || cols == 0 {
            return None;
        }
        let row = (self.row as isize + delta_row).clamp(0, rows as isize - 1) as usize;
        let col = (self.col as isize + delta_col).clamp(0, cols as isize - 1) as usize;
        Some(Self { row, col })
    }

    /// Pull the position back inside `rows` x `cols`
    pub fn clamped(&self, rows: usize, cols: usize) -> Option<Self> {
        self.offset_clamped(0, 0, rows, cols)
    }
}

/// The selected cell, if any. At most one cell is selected at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    active_cell: Option<CellPosition>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    /// Grids open with the top-left cell selected
    pub fn new() -> Self {
        Self {
            active_cell: Some(CellPosition::origin()),
        }
    }

    pub fn select_cell(&mut self, pos: CellPosition) {
        self.active_cell = Some(pos);
    }

    pub fn clear(&mut self) {
        self.active_cell = None;
    }

    pub fn active_cell(&self) -> Option<CellPosition> {
        self.active_cell
    }

    pub fn is_selected(&self, pos: CellPosition) -> bool {
        self.active_cell == Some(pos)
    }

    /// Keep the selection valid after the grid shrinks or grows
    pub fn clamp_to(&mut self, rows: usize, cols: usize) {
        self.active_cell = self.active_cell.and_then(|pos| pos.clamped(rows, cols));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_position_new() {
        let pos = CellPosition::new(5, 10);
        assert_eq!(pos.row, 5);
        assert_eq!(pos.col, 10);
    }

    #[test]
    fn test_cell_position_origin() {
        assert_eq!(CellPosition::origin(), CellPosition::new(0, 0));
    }

    #[test]
    fn test_offset_clamped_within_bounds() {
        let pos = CellPosition::new(2, 2);
        assert_eq!(pos.offset_clamped(1, 0, 5, 5), Some(CellPosition::new(3, 2)));
        assert_eq!(pos.offset_clamped(0, -1, 5, 5), Some(CellPosition::new(2, 1)));
    }

    #[test]
    fn test_offset_clamped_at_edges() {
        let origin = CellPosition::origin();
        assert_eq!(origin.offset_clamped(-1, 0, 3, 3), Some(origin));
        assert_eq!(origin.offset_clamped(0, -1, 3, 3), Some(origin));

        let corner = CellPosition::new(2, 2);
        assert_eq!(corner.offset_clamped(1, 0, 3, 3), Some(corner));
        assert_eq!(corner.offset_clamped(0, 1, 3, 3), Some(corner));
    }

    #[test]
    fn test_offset_clamped_empty_grid() {
        assert_eq!(CellPosition::origin().offset_clamped(1, 0, 0, 4), None);
    }

    #[test]
    fn test_clamped_pulls_back_inside() {
        assert_eq!(
            CellPosition::new(9, 7).clamped(4, 3),
            Some(CellPosition::new(3, 2))
        );
    }

    #[test]
    fn test_selection_starts_at_origin() {
        let selection = Selection::new();
        assert_eq!(selection.active_cell(), Some(CellPosition::origin()));
        assert!(selection.is_selected(CellPosition::origin()));
    }

    #[test]
    fn test_select_and_clear() {
        let mut selection = Selection::new();
        selection.select_cell(CellPosition::new(3, 4));
        assert!(selection.is_selected(CellPosition::new(3, 4)));
        assert!(!selection.is_selected(CellPosition::origin()));

        selection.clear();
        assert_eq!(selection.active_cell(), None);
    }

    #[test]
    fn test_clamp_to() {
        let mut selection = Selection::new();
        selection.select_cell(CellPosition::new(5, 5));
        selection.clamp_to(3, 8);
        assert_eq!(selection.active_cell(), Some(CellPosition::new(2, 5)));

        selection.clamp_to(0, 8);
        assert_eq!(selection.active_cell(), None);
    }
}
