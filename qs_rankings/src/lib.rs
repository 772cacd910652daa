/*!
Cleaning and name reconciliation for the QS World University Rankings results.

The public results workbook encodes ranks inconsistently: plain numbers, ties ("12="),
bands ("601-650") and dashes. This crate turns the raw rows into a typed
[RankingTable] with 25 columns, and resolves institution names coming from other
sources against it, using an explicit alias table and a list of institutions known to be
missing from the rankings.

This crate does not read files. The `uniranks` tool reads the workbook and feeds the rows
as [RawCell] values.

```
use qs_rankings::*;

let mut row = vec![RawCell::Empty; Column::COUNT];
row[Column::Rank2022.position()] = RawCell::text("12=");
row[Column::InstitutionName.position()] = RawCell::text("Imperial College London");
row[Column::ClassificationAge.position()] = RawCell::Int(5);
row[Column::OverallScore.position()] = RawCell::Float(93.1);

let table = RankingTable::from_rows(vec![row])?;
let names = NameReconciler::default();
let resolver = Resolver::new(&table, &names);

// "Imperial College" is a known alias.
assert_eq!(resolver.metric("Imperial College", Column::Rank2022)?, 12.0);
// Known to be absent from the rankings.
assert!(resolver.overall_score("EM Lyon")?.is_nan());
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

mod convert;
pub mod destinations;
mod names;
mod resolve;
mod schema;
mod scores;
mod table;

use std::fmt::Display;

pub use crate::convert::*;
pub use crate::destinations::{BST_DESTINATIONS, LFIT_DESTINATIONS};
pub use crate::names::*;
pub use crate::resolve::*;
pub use crate::schema::*;
pub use crate::scores::*;
pub use crate::table::*;

// ********* Input data structures ***********

/// The content of one worksheet cell, before any conversion.
#[derive(PartialEq, Debug, Clone)]
pub enum RawCell {
    /// A cell with no content. Converters treat it like the empty string.
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    /// A spreadsheet error value such as `#N/A`.
    Error(String),
}

impl RawCell {
    pub fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_string())
    }

    /// Empty cells and empty strings alike.
    pub fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl Display for RawCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawCell::Empty => write!(f, ""),
            RawCell::Int(i) => write!(f, "{}", i),
            RawCell::Float(x) => write!(f, "{}", x),
            RawCell::Text(s) => write!(f, "{}", s),
            RawCell::Bool(b) => write!(f, "{}", b),
            RawCell::Error(e) => write!(f, "{}", e),
        }
    }
}
