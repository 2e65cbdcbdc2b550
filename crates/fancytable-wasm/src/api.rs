use fancytable_core::{
    default_themes, Background, CropHandle, CropSettings, DragTarget, EditorConfig, EditorError,
    EditorSession, ImportTicket, Key, Modifiers, MARGIN_PRESETS,
};
use fancytable_io::{import_file, import_text, table_to_csv, table_to_xlsx, ExportError, ImportError};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Table editor exposed to JavaScript
#[wasm_bindgen]
pub struct TableEditor {
    session: EditorSession,
}

/// Structured error object for JavaScript
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsEditorError {
    code: String,
    message: String,
}

impl From<EditorError> for JsEditorError {
    fn from(err: EditorError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<ImportError> for JsEditorError {
    fn from(err: ImportError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<ExportError> for JsEditorError {
    fn from(err: ExportError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl JsEditorError {
    fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            code: "INVALID_ARGUMENT".to_string(),
            message: message.into(),
        }
    }

    fn into_js(self) -> JsValue {
        web_sys::console::error_1(&format!("[{}] {}", self.code, self.message).into());
        serde_wasm_bindgen::to_value(&self).unwrap_or(JsValue::NULL)
    }
}

fn to_js_error<E: Into<JsEditorError>>(err: E) -> JsValue {
    err.into().into_js()
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// `None` grabs the whole crop region; otherwise a handle name like "top-left"
fn parse_drag_target(handle: Option<&str>) -> Result<DragTarget, JsEditorError> {
    match handle {
        None | Some("") => Ok(DragTarget::Move),
        Some(name) => CropHandle::from_name(name)
            .map(DragTarget::Resize)
            .ok_or_else(|| JsEditorError::invalid_argument(format!("Unknown crop handle: {}", name))),
    }
}

/// Margin preset as listed in the crop controls
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MarginPresetData {
    name: &'static str,
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

fn margin_presets() -> Vec<MarginPresetData> {
    MARGIN_PRESETS
        .iter()
        .map(|p| MarginPresetData {
            name: p.name,
            top: p.insets.top,
            right: p.insets.right,
            bottom: p.insets.bottom,
            left: p.insets.left,
        })
        .collect()
}

#[wasm_bindgen]
impl TableEditor {
    /// Create an editor; `config_json` may be omitted or empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<TableEditor, JsValue> {
        let config = EditorConfig::from_json(config_json.as_deref().unwrap_or(""))
            .map_err(to_js_error)?;
        Ok(Self {
            session: EditorSession::new(config),
        })
    }

    // ---- Import / export ----

    /// Start an import; pass the ticket to `completeImport` once the file is read
    #[wasm_bindgen(js_name = beginImport)]
    pub fn begin_import(&mut self) -> f64 {
        self.session.begin_import().0 as f64
    }

    /// Finish an import. Fails with STALE_IMPORT when a newer import was
    /// started, and leaves the current table untouched on any error.
    #[wasm_bindgen(js_name = completeImport)]
    pub fn complete_import(&mut self, ticket: f64, file_name: &str, bytes: &[u8]) -> Result<(), JsValue> {
        let table = import_file(self.session.config(), file_name, bytes).map_err(to_js_error)?;
        self.session
            .complete_import(ImportTicket(ticket as u64), table)
            .map_err(to_js_error)
    }

    /// Import a file in one step
    #[wasm_bindgen(js_name = importFile)]
    pub fn import_file(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), JsValue> {
        let ticket = self.begin_import();
        self.complete_import(ticket, file_name, bytes)
    }

    /// Replace the table with pasted delimited text
    #[wasm_bindgen(js_name = pasteText)]
    pub fn paste_text(&mut self, text: &str) -> Result<(), JsValue> {
        if text.is_empty() {
            return Ok(());
        }
        let table = import_text(self.session.config(), text).map_err(to_js_error)?;
        self.session.replace_table(table);
        Ok(())
    }

    #[wasm_bindgen(js_name = exportCsv)]
    pub fn export_csv(&self) -> Result<String, JsValue> {
        table_to_csv(&self.session.table()).map_err(to_js_error)
    }

    /// Text to place on the clipboard when copying the table
    #[wasm_bindgen(js_name = clipboardText)]
    pub fn clipboard_text(&self) -> Result<String, JsValue> {
        self.export_csv()
    }

    #[wasm_bindgen(js_name = exportXlsx)]
    pub fn export_xlsx(&self) -> Result<js_sys::Uint8Array, JsValue> {
        let bytes = table_to_xlsx(&self.session.table()).map_err(to_js_error)?;
        Ok(js_sys::Uint8Array::from(bytes.as_slice()))
    }

    /// Download name for an export, e.g. `fileName("csv")`
    #[wasm_bindgen(js_name = fileName)]
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.session.table().name, extension)
    }

    // ---- Grid interaction ----

    /// Handle a keydown from the grid; returns true when the table changed
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        let modifiers = Modifiers::new()
            .with_shift(shift)
            .with_ctrl(ctrl)
            .with_alt(alt)
            .with_meta(meta);
        self.session.handle_key(Key::from_dom(key), modifiers)
    }

    #[wasm_bindgen]
    pub fn click(&mut self, row: u32, col: u32) {
        self.session.click(row as usize, col as usize);
    }

    #[wasm_bindgen(js_name = doubleClick)]
    pub fn double_click(&mut self, row: u32, col: u32) {
        self.session.double_click(row as usize, col as usize);
    }

    /// The edit input lost focus; commits the edit buffer
    #[wasm_bindgen]
    pub fn blur(&mut self) -> bool {
        self.session.blur()
    }

    #[wasm_bindgen(js_name = updateEditBuffer)]
    pub fn update_edit_buffer(&mut self, content: &str) {
        self.session.update_edit_buffer(content);
    }

    /// Current interaction state: idle, selected or editing
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        to_js(&self.session.phase())
    }

    // ---- Rendering ----

    #[wasm_bindgen(js_name = getTable)]
    pub fn get_table(&self) -> JsValue {
        to_js(self.session.table().as_ref())
    }

    #[wasm_bindgen(js_name = getTableJson)]
    pub fn get_table_json(&self) -> String {
        serde_json::to_string(self.session.table().as_ref()).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = rowCount)]
    pub fn row_count(&self) -> u32 {
        self.session.table().row_count() as u32
    }

    #[wasm_bindgen(js_name = columnCount)]
    pub fn column_count(&self) -> u32 {
        self.session.table().column_count() as u32
    }

    #[wasm_bindgen(js_name = headerLabels)]
    pub fn header_labels(&self) -> JsValue {
        to_js(&self.session.header_labels())
    }

    /// Display text, alignment, selection and style of one cell; null when
    /// out of bounds
    #[wasm_bindgen(js_name = getCellView)]
    pub fn get_cell_view(&self, row: u32, col: u32) -> JsValue {
        match self.session.cell_view(row as usize, col as usize) {
            Some(view) => to_js(&view),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = tableStyle)]
    pub fn table_style(&self) -> JsValue {
        to_js(&self.session.table_style())
    }

    #[wasm_bindgen(js_name = headerStyle)]
    pub fn header_style(&self) -> JsValue {
        to_js(&self.session.header_style())
    }

    /// Hide selection and edit chrome while an image is captured
    #[wasm_bindgen(js_name = setChromeHidden)]
    pub fn set_chrome_hidden(&mut self, hidden: bool) {
        self.session.set_chrome_hidden(hidden);
    }

    // ---- Themes and backgrounds ----

    #[wasm_bindgen]
    pub fn themes(&self) -> JsValue {
        to_js(&default_themes())
    }

    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&mut self, theme_id: &str) -> Result<(), JsValue> {
        self.session.set_theme(theme_id).map_err(to_js_error)
    }

    /// Set the background from `{kind: "themeDefault" | "fill" | "image", value?}`
    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, background: JsValue) -> Result<(), JsValue> {
        let background: Background = serde_wasm_bindgen::from_value(background)
            .map_err(|e| JsEditorError::invalid_argument(e.to_string()).into_js())?;
        self.session.set_background(background);
        Ok(())
    }

    #[wasm_bindgen(js_name = backgroundStyle)]
    pub fn background_style(&self) -> JsValue {
        to_js(&self.session.background_style())
    }

    // ---- Structure ----

    #[wasm_bindgen(js_name = addRow)]
    pub fn add_row(&mut self) {
        self.session.add_row();
    }

    #[wasm_bindgen(js_name = addColumn)]
    pub fn add_column(&mut self) {
        self.session.add_column();
    }

    /// Remove a row; the last one when no index is given
    #[wasm_bindgen(js_name = removeRow)]
    pub fn remove_row(&mut self, index: Option<u32>) -> bool {
        match index {
            Some(i) => self.session.remove_row(i as usize),
            None => self.session.remove_last_row(),
        }
    }

    /// Remove a column; the last one when no index is given. The only
    /// remaining column is never removed.
    #[wasm_bindgen(js_name = removeColumn)]
    pub fn remove_column(&mut self, index: Option<u32>) -> bool {
        match index {
            Some(i) => self.session.remove_column(i as usize),
            None => self.session.remove_last_column(),
        }
    }

    #[wasm_bindgen]
    pub fn rename(&mut self, name: &str) {
        self.session.rename(name);
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.session.reset();
    }

    // ---- Crop ----

    #[wasm_bindgen(js_name = getCrop)]
    pub fn get_crop(&self) -> JsValue {
        to_js(self.session.crop())
    }

    #[wasm_bindgen(js_name = setCrop)]
    pub fn set_crop(&mut self, crop: JsValue) -> Result<(), JsValue> {
        let crop: CropSettings = serde_wasm_bindgen::from_value(crop)
            .map_err(|e| JsEditorError::invalid_argument(e.to_string()).into_js())?;
        self.session.set_crop(crop);
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleCrop)]
    pub fn toggle_crop(&mut self) {
        self.session.toggle_crop();
    }

    #[wasm_bindgen(js_name = cropPresets)]
    pub fn crop_presets(&self) -> JsValue {
        to_js(&margin_presets())
    }

    #[wasm_bindgen(js_name = cropPresetName)]
    pub fn crop_preset_name(&self) -> String {
        self.session.crop().current_preset_name().to_string()
    }

    #[wasm_bindgen(js_name = applyCropPreset)]
    pub fn apply_crop_preset(&mut self, name: &str) -> bool {
        self.session.apply_crop_preset(name)
    }

    /// Start dragging a crop handle (or the whole region when `handle` is
    /// omitted). Returns false while cropping is disabled.
    #[wasm_bindgen(js_name = beginCropDrag)]
    pub fn begin_crop_drag(&mut self, handle: Option<String>, x: f64, y: f64) -> Result<bool, JsValue> {
        let target = parse_drag_target(handle.as_deref()).map_err(JsEditorError::into_js)?;
        Ok(self.session.begin_crop_drag(target, x, y))
    }

    #[wasm_bindgen(js_name = updateCropDrag)]
    pub fn update_crop_drag(&mut self, x: f64, y: f64) {
        self.session.update_crop_drag(x, y);
    }

    #[wasm_bindgen(js_name = endCropDrag)]
    pub fn end_crop_drag(&mut self) {
        self.session.end_crop_drag();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drag_target() {
        assert_eq!(parse_drag_target(None).unwrap(), DragTarget::Move);
        assert_eq!(parse_drag_target(Some("")).unwrap(), DragTarget::Move);
        assert_eq!(
            parse_drag_target(Some("bottom-right")).unwrap(),
            DragTarget::Resize(CropHandle::BottomRight)
        );

        let err = parse_drag_target(Some("middle")).unwrap_err();
        assert_eq!(err.code, "INVALID_ARGUMENT");
        assert!(err.message.contains("middle"));
    }

    #[test]
    fn test_error_conversion() {
        let err = JsEditorError::from(EditorError::UnknownTheme("neon".into()));
        assert_eq!(err.code, "UNKNOWN_THEME");
        assert_eq!(err.message, "Unknown theme: neon");

        let err = JsEditorError::from(ImportError::UnsupportedFileType("a.txt".into()));
        assert_eq!(err.code, "UNSUPPORTED_FILE_TYPE");
    }

    #[test]
    fn test_error_serialization() {
        let err = JsEditorError::from(ImportError::NoWorksheet);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"code":"NO_WORKSHEET","message":"Workbook contains no worksheets"}"#
        );
    }

    #[test]
    fn test_margin_presets_listed() {
        let presets = margin_presets();
        assert_eq!(presets.len(), MARGIN_PRESETS.len());
        assert_eq!(presets[0].name, "No Margin");
        let json = serde_json::to_value(&presets[5]).unwrap();
        assert_eq!(json["top"], 40.0);
        assert_eq!(json["left"], 20.0);
    }
}
