/// Convert column index (0-indexed) to its header label (A, B, ..., Z, AA, AB, ...)
pub fn col_to_label(col: usize) -> String {
    let mut label = String::new();
    let mut n = col + 1; // 1-indexed for calculation

    while n > 0 {
        n -= 1;
        label.insert(0, char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }

    label
}

/// Header labels for a table with `column_count` columns
pub fn header_labels(column_count: usize) -> Vec<String> {
    (0..column_count).map(col_to_label).collect()
}
