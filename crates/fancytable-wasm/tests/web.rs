#![cfg(target_arch = "wasm32")]

use fancytable_wasm::TableEditor;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn test_blank_editor() {
    let editor = TableEditor::new(None).unwrap();
    assert_eq!(editor.row_count(), 10);
    assert_eq!(editor.column_count(), 8);
    assert_eq!(editor.file_name("csv"), "New Table.csv");
}

#[wasm_bindgen_test]
fn test_paste_then_export() {
    let mut editor = TableEditor::new(None).unwrap();
    editor.paste_text("Item\tShare\nWidget\t45%").unwrap();
    assert_eq!(editor.column_count(), 2);
    assert_eq!(editor.export_csv().unwrap(), "Item,Share\r\nWidget,45.00%");
}

#[wasm_bindgen_test]
fn test_typing_commits_on_enter() {
    let mut editor = TableEditor::new(None).unwrap();
    editor.click(1, 1);
    editor.handle_key("7", false, false, false, false);
    assert!(editor.handle_key("Enter", false, false, false, false));
    assert!(editor.export_csv().unwrap().contains('7'));
}

#[wasm_bindgen_test]
fn test_stale_import_is_rejected() {
    let mut editor = TableEditor::new(None).unwrap();
    let first = editor.begin_import();
    let second = editor.begin_import();
    assert!(editor.complete_import(first, "a.csv", b"x,y").is_err());
    editor.complete_import(second, "b.csv", b"x,y,z").unwrap();
    assert_eq!(editor.column_count(), 3);
}
