use std::path::Path;

use calamine::DataType;
use qs_rankings::RawCell;

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Maps a calamine cell to the cell model of the rankings library.
pub fn raw_cell(cell: &DataType) -> RawCell {
    match cell {
        DataType::Int(i) => RawCell::Int(*i),
        DataType::Float(f) => RawCell::Float(*f),
        DataType::String(s) => RawCell::Text(s.clone()),
        DataType::Bool(b) => RawCell::Bool(*b),
        DataType::Error(e) => RawCell::Error(e.to_string()),
        DataType::Empty => RawCell::Empty,
        // Dates and durations have no place in the rankings: keep them as text so that
        // the converters reject them with a readable message.
        #[allow(unreachable_patterns)]
        other => RawCell::Text(format!("{:?}", other)),
    }
}

/// Worksheet rows as raw cells, with their 1-based worksheet row number.
///
/// `skip_rows` counts from the top of the sheet, even when the used range starts
/// lower. Rows are aligned so that index 0 is column A.
pub fn sheet_rows(
    range: &calamine::Range<DataType>,
    skip_rows: usize,
) -> Vec<(usize, Vec<RawCell>)> {
    let (first_row, first_col) = match range.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return Vec::new(),
    };
    range
        .rows()
        .enumerate()
        .map(|(idx, row)| (first_row + idx, row))
        .filter(|(abs_row, _)| *abs_row >= skip_rows)
        .map(|(abs_row, row)| {
            let mut cells: Vec<RawCell> = vec![RawCell::Empty; first_col];
            cells.extend(row.iter().map(raw_cell));
            (abs_row + 1, cells)
        })
        .collect()
}
