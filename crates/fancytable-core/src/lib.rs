pub mod background;
pub mod cell;
pub mod config;
pub mod crop;
pub mod error;
pub mod format;
pub mod infer;
pub mod range;
pub mod session;
pub mod state;
pub mod table;
pub mod theme;

pub use background::{background_style, Background, BackgroundStyle};
pub use cell::{Cell, CellInput, CellType, CellValue, Numeric};
pub use config::EditorConfig;
pub use crop::{CropDrag, CropHandle, CropInsets, CropSettings, DragTarget, MARGIN_PRESETS};
pub use error::EditorError;
pub use format::{alignment, display_value, export_text, CellFormat, HorizontalAlign};
pub use infer::{convert_value, detect_cell_type, infer_cell, parse_lenient_number};
pub use range::{col_to_label, header_labels};
pub use session::{CellView, EditorSession, ImportTicket};
pub use state::{
    key_to_action, CellPosition, Commit, EditMode, EditState, GridPhase, GridState, InputAction,
    Key, Modifiers, Selection,
};
pub use table::{Row, Table};
pub use theme::{cell_style, default_themes, header_style, table_style, theme_by_id, Theme};
