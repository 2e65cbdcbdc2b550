use fancytable_core::format::display_value;
use fancytable_core::{CellFormat, CellType, CellValue, EditorConfig, Numeric, Table};
use fancytable_io::{import_text, parse_delimited, table_to_csv};

fn build(text: &str) -> Table {
    Table::from_rows(&parse_delimited(text).unwrap(), "T")
}

fn values(table: &Table) -> Vec<Vec<CellValue>> {
    table
        .rows()
        .iter()
        .map(|r| r.cells.iter().map(|c| c.value.clone()).collect())
        .collect()
}

#[test]
fn test_plain_table_survives_csv_round_trip() {
    let table = build("name,qty,price\napple,3,1.25\npear,-2,0.5\n");
    let csv = table_to_csv(&table).unwrap();
    let back = build(&csv);

    assert_eq!(back.column_count(), table.column_count());
    assert_eq!(values(&back), values(&table));
}

#[test]
fn test_ragged_rows_are_padded() {
    let table = build("a,b,c\nd\ne,f\n");
    assert_eq!(table.column_count(), 3);
    for row in table.rows() {
        assert_eq!(row.cells.len(), 3);
    }
    let padded = &table.rows()[1].cells[1];
    assert_eq!(padded.cell_type(), CellType::Text);
    assert!(padded.value.is_empty());
}

#[test]
fn test_percentage_conversion_and_export() {
    let table = build("45%\n");
    let cell = table.cell(0, 0).unwrap();
    assert_eq!(cell.cell_type(), CellType::Percentage);
    assert_eq!(cell.value, CellValue::Percentage(Numeric::Parsed(0.45)));

    assert_eq!(table_to_csv(&table).unwrap(), "45.00%");
}

#[test]
fn test_currency_conversion_and_display() {
    let table = build("\"$1,234.50\"\n");
    let cell = table.cell(0, 0).unwrap();
    assert_eq!(cell.cell_type(), CellType::Currency);
    assert_eq!(cell.value, CellValue::Currency(Numeric::Parsed(1234.5)));
    assert_eq!(cell.format, Some(CellFormat::currency("USD")));
    assert_eq!(cell.format.as_ref().unwrap().decimals, Some(2));
    assert_eq!(display_value(cell), "$1234.50");
}

#[test]
fn test_formatted_export_reimports_with_same_types() {
    let table = build("Item\tPrice\tShare\nWidget\t$1,234.50\t12.5%\n");
    let back = build(&table_to_csv(&table).unwrap());

    for (a, b) in table.rows().iter().zip(back.rows()) {
        let types_a: Vec<CellType> = a.cells.iter().map(|c| c.cell_type()).collect();
        let types_b: Vec<CellType> = b.cells.iter().map(|c| c.cell_type()).collect();
        assert_eq!(types_a, types_b);
    }
    assert_eq!(values(&back), values(&table));
}

#[test]
fn test_pasted_data_with_custom_config() {
    let config = EditorConfig::from_json(r#"{"pasteTableName": "Clipboard", "defaultCurrency": "EUR"}"#)
        .unwrap();
    let table = import_text(&config, "$3.00\t4").unwrap();
    assert_eq!(table.name, "Clipboard");
    let format = table.cell(0, 0).unwrap().format.clone().unwrap();
    assert_eq!(format.effective_currency(), "EUR");
}
