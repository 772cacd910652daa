// Reading the rankings table out of the QS results workbook.

use std::path::Path;

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use log::{debug, info, warn};
use qs_rankings::RankingTable;
use snafu::prelude::*;

use crate::rankings::io_common::{sheet_rows, simplify_file_name};
use crate::rankings::*;

pub fn read_workbook(source: &SourceSettings) -> RankingsResult<RankingTable> {
    let path = source.workbook_path.as_path();
    info!("Attempting to read rankings workbook {:?}", path);
    let wrange = get_range(path, source.worksheet_name.as_deref())?;
    let table = table_from_range(&wrange, source.skip_rows).context(BuildingTableSnafu {
        path: simplify_file_name(path),
    })?;
    if table.num_rows() != source.expected_rows {
        warn!(
            "read_workbook: {:?} has {} rows, expected {}",
            path,
            table.num_rows(),
            source.expected_rows
        );
    }
    Ok(table)
}

/// Builds the table from a worksheet, skipping the first `skip_rows` rows of the sheet.
pub fn table_from_range(
    wrange: &Range<DataType>,
    skip_rows: usize,
) -> Result<RankingTable, qs_rankings::TableError> {
    let rows = sheet_rows(wrange, skip_rows);
    debug!(
        "table_from_range: {} data rows after skipping {}",
        rows.len(),
        skip_rows
    );
    let first_row = rows.first().map(|(lineno, _)| *lineno).unwrap_or(skip_rows + 1);
    // The row numbers are contiguous: calamine returns every row of the used range.
    RankingTable::from_rows_with_offset(rows.into_iter().map(|(_, cells)| cells), first_row)
}

fn get_range(path: &Path, worksheet_name: Option<&str>) -> RankingsResult<Range<DataType>> {
    let path_s = path.display().to_string();
    debug!("get_range: path: {:?} worksheet: {:?}", &path_s, &worksheet_name);
    let mut workbook: Xlsx<_> =
        open_workbook(path).context(OpeningExcelSnafu { path: path_s.clone() })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                worksheet: worksheet_name,
                path: path_s.clone(),
            })?
            .context(OpeningExcelSnafu { path: path_s })?;
        Ok(wrange)
    } else {
        let wrange = workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path: path_s.clone() })?
            .context(OpeningExcelSnafu { path: path_s })?;
        Ok(wrange)
    }
}
