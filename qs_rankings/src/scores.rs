use std::cmp::Ordering;

use log::{debug, info};

use crate::resolve::{ResolveError, Resolver};
use crate::schema::Column;

/// One resolved institution.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoreRow {
    /// Position after sorting, starting at 0.
    pub index: usize,
    pub name: String,
    pub rank_2022: f64,
    pub score: f64,
}

/// The 2022 rank and overall score of a list of institutions, best ranked first.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ScoreTable {
    pub rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.name.as_str()).collect()
    }
}

// Ascending, NaN last.
fn rank_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Resolves the 2022 rank and the overall score of every name, then sorts by rank.
///
/// The first name that cannot be resolved aborts the whole table.
pub fn build_score_table<S: AsRef<str>>(
    resolver: &Resolver,
    names: &[S],
) -> Result<ScoreTable, ResolveError> {
    info!("Resolving scores for {} institutions", names.len());
    let mut rows: Vec<ScoreRow> = Vec::with_capacity(names.len());
    for name in names.iter().map(|s| s.as_ref()) {
        let rank_2022 = resolver.metric(name, Column::Rank2022)?;
        let score = resolver.overall_score(name)?;
        debug!(
            "build_score_table: {:?} rank: {} score: {}",
            name, rank_2022, score
        );
        rows.push(ScoreRow {
            index: 0,
            name: name.to_string(),
            rank_2022,
            score,
        });
    }
    // Stable: equal ranks keep the input order.
    rows.sort_by(|a, b| rank_order(a.rank_2022, b.rank_2022));
    for (idx, row) in rows.iter_mut().enumerate() {
        row.index = idx;
    }
    Ok(ScoreTable { rows })
}
