use log::{debug, warn};
use snafu::prelude::*;

use crate::convert::MISSING;
use crate::names::NameReconciler;
use crate::schema::Column;
use crate::table::RankingTable;

/// Number of alias redirects followed for one lookup.
const MAX_ALIAS_HOPS: usize = 1;

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ResolveError {
    /// No row, or more than one row, carries this exact name.
    #[snafu(display("No unique row for institution {name:?} ({matches} matching rows)"))]
    AmbiguousOrAbsent { name: String, matches: usize },
    #[snafu(display("Column {column} does not hold numbers"))]
    NotNumeric { column: Column },
}

type ResolveResult<T> = Result<T, ResolveError>;

/// Looks up metrics by institution name.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a RankingTable,
    names: &'a NameReconciler,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a RankingTable, names: &'a NameReconciler) -> Resolver<'a> {
        Resolver { table, names }
    }

    pub fn overall_score(&self, name: &str) -> ResolveResult<f64> {
        self.metric(name, Column::OverallScore)
    }

    /// The value of `metric` for the institution called `name`.
    ///
    /// When the name does not identify exactly one row, the absence set is checked
    /// first (the result is then NaN), then the alias table, whose target is looked up
    /// instead. Anything else is an error.
    pub fn metric(&self, name: &str, metric: Column) -> ResolveResult<f64> {
        let mut current: &str = name;
        let mut hops: usize = 0;
        loop {
            match self.unique_row(current) {
                Ok(row) => {
                    let x = self
                        .table
                        .numeric_value(row, metric)
                        .context(NotNumericSnafu { column: metric })?;
                    debug!("metric: {:?} {} -> {}", current, metric, x);
                    return Ok(x);
                }
                Err(e) => {
                    if self.names.is_absent(current) {
                        warn!("metric: {:?} is not ranked, using NaN", current);
                        return Ok(MISSING);
                    }
                    match self.names.canonical_name(current) {
                        Some(canonical) if hops < MAX_ALIAS_HOPS => {
                            warn!("metric: looking up {:?} as {:?}", current, canonical);
                            current = canonical;
                            hops += 1;
                        }
                        _ => return Err(e),
                    }
                }
            }
        }
    }

    fn unique_row(&self, name: &str) -> ResolveResult<usize> {
        match self.table.rows_named(name) {
            [row] => Ok(*row),
            rows => AmbiguousOrAbsentSnafu {
                name,
                matches: rows.len(),
            }
            .fail(),
        }
    }
}
