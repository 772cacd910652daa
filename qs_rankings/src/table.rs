use std::collections::HashMap;

use log::{debug, info, warn};
use snafu::prelude::*;

use crate::convert::*;
use crate::schema::*;
use crate::RawCell;

#[derive(Debug, Snafu)]
pub enum TableError {
    /// `row` is the 1-based position of the row in the worksheet.
    #[snafu(display("Row {row}, column {column}: {source}"))]
    Conversion {
        source: ConvertError,
        row: usize,
        column: Column,
    },
    #[snafu(display("Column {column} has {actual} values, expected {expected}"))]
    ColumnLength {
        column: Column,
        actual: usize,
        expected: usize,
    },
}

type TableResult<T> = Result<T, TableError>;

static EMPTY_CELL: RawCell = RawCell::Empty;

/// The values of one column, stored with the column's dtype.
#[derive(PartialEq, Debug, Clone)]
pub enum ColumnData {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    fn empty(dtype: DType) -> ColumnData {
        match dtype {
            DType::Float => ColumnData::Float(Vec::new()),
            DType::Int => ColumnData::Int(Vec::new()),
            DType::Text => ColumnData::Text(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Float(v) => v.len(),
            ColumnData::Int(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        match self {
            ColumnData::Float(_) => DType::Float,
            ColumnData::Int(_) => DType::Int,
            ColumnData::Text(_) => DType::Text,
        }
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_texts(&self) -> Option<&[Option<String>]> {
        match self {
            ColumnData::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Forces a numeric column to floats. Text columns are left untouched.
    fn into_floats(self) -> ColumnData {
        match self {
            ColumnData::Int(v) => ColumnData::Float(v.into_iter().map(|i| i as f64).collect()),
            other => other,
        }
    }

    fn push(&mut self, column: Column, cell: &RawCell) -> Result<(), ConvertError> {
        match self {
            ColumnData::Float(v) => {
                let x = match column.kind() {
                    ColumnKind::Rank => convert_rank(cell)?,
                    ColumnKind::OverallScore => convert_overall_score(cell)?,
                    _ => convert_score(cell)?,
                };
                v.push(x);
            }
            ColumnData::Int(v) => v.push(convert_integer(cell)?),
            ColumnData::Text(v) => v.push(convert_text(cell)?),
        }
        Ok(())
    }
}

/// The rankings, one row per institution, stored by column.
///
/// Invariants: the columns are the 25 of [Column::ALL] in order, with the dtype given by
/// [Column::dtype], and all have the same length.
#[derive(PartialEq, Debug, Clone)]
pub struct RankingTable {
    columns: Vec<ColumnData>,
    num_rows: usize,
    // Exact institution name -> row positions.
    name_index: HashMap<String, Vec<usize>>,
}

impl RankingTable {
    /// Builds the table from data rows, without the metadata rows of the workbook.
    ///
    /// Rows are mapped positionally: cell 0 is [Column::NationalRank]. Missing trailing
    /// cells are empty and cells past the 25th are ignored. Fully empty rows are dropped.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> TableResult<RankingTable>
    where
        R: AsRef<[RawCell]>,
    {
        Self::from_rows_with_offset(rows, 1)
    }

    /// Same as [RankingTable::from_rows], with `first_row` the worksheet row number of
    /// the first row (used in error messages).
    pub fn from_rows_with_offset<R>(
        rows: impl IntoIterator<Item = R>,
        first_row: usize,
    ) -> TableResult<RankingTable>
    where
        R: AsRef<[RawCell]>,
    {
        let mut columns: Vec<ColumnData> = Column::ALL
            .iter()
            .map(|c| ColumnData::empty(c.dtype()))
            .collect();
        let mut num_rows: usize = 0;
        for (idx, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let lineno = first_row + idx;
            let cells: Vec<&RawCell> = Column::ALL
                .iter()
                .map(|c| row.get(c.position()).unwrap_or(&EMPTY_CELL))
                .collect();
            if cells.iter().all(|c| c.is_empty()) {
                debug!("from_rows: skipping empty row {}", lineno);
                continue;
            }
            for (column, (data, cell)) in Column::ALL.iter().zip(columns.iter_mut().zip(cells)) {
                data.push(*column, cell).context(ConversionSnafu {
                    row: lineno,
                    column: *column,
                })?;
            }
            num_rows += 1;
        }
        Self::from_columns(columns, num_rows)
    }

    fn from_columns(columns: Vec<ColumnData>, num_rows: usize) -> TableResult<RankingTable> {
        let mut columns = columns;
        // The 2021 ranks are always floats, even when every value read is integral.
        let pos = Column::Rank2021.position();
        let rank_2021 = std::mem::replace(&mut columns[pos], ColumnData::Float(Vec::new()));
        columns[pos] = rank_2021.into_floats();

        for (column, data) in Column::ALL.iter().zip(columns.iter()) {
            ensure!(
                data.len() == num_rows,
                ColumnLengthSnafu {
                    column: *column,
                    actual: data.len(),
                    expected: num_rows,
                }
            );
        }

        let mut name_index: HashMap<String, Vec<usize>> = HashMap::new();
        if let ColumnData::Text(names) = &columns[Column::InstitutionName.position()] {
            for (idx, name) in names.iter().enumerate() {
                if let Some(name) = name {
                    name_index.entry(name.clone()).or_default().push(idx);
                }
            }
        }

        let table = RankingTable {
            columns,
            num_rows,
            name_index,
        };
        info!(
            "Built ranking table: {} rows, {} columns",
            table.num_rows(),
            table.num_columns()
        );
        for name in table.duplicate_names() {
            warn!(
                "Institution {:?} appears on several rows, it cannot be looked up",
                name
            );
        }
        Ok(table)
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    pub fn column(&self, column: Column) -> &ColumnData {
        &self.columns[column.position()]
    }

    pub fn dtypes(&self) -> Vec<(Column, DType)> {
        Column::ALL
            .iter()
            .zip(self.columns.iter())
            .map(|(c, data)| (*c, data.dtype()))
            .collect()
    }

    /// Positions of the rows whose institution name is exactly `name`.
    pub fn rows_named(&self, name: &str) -> &[usize] {
        self.name_index
            .get(name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Institution names found on more than one row, sorted.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut res: Vec<&str> = self
            .name_index
            .iter()
            .filter(|(_, rows)| rows.len() > 1)
            .map(|(name, _)| name.as_str())
            .collect();
        res.sort_unstable();
        res
    }

    /// The numeric value of a cell, integers widened to floats. None for text columns.
    pub fn numeric_value(&self, row: usize, column: Column) -> Option<f64> {
        match self.column(column) {
            ColumnData::Float(v) => v.get(row).copied(),
            ColumnData::Int(v) => v.get(row).map(|i| *i as f64),
            ColumnData::Text(_) => None,
        }
    }

    pub fn text_value(&self, row: usize, column: Column) -> Option<&str> {
        self.column(column)
            .as_texts()
            .and_then(|v| v.get(row))
            .and_then(|s| s.as_deref())
    }
}
