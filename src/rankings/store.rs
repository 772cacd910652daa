use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use log::{debug, info};
use qs_rankings::{build_score_table, Column, NameReconciler, RankingTable, Resolver, ScoreTable};
use snafu::prelude::*;

use crate::rankings::io_xlsx::read_workbook;
use crate::rankings::*;

pub type TableLoader = Box<dyn Fn() -> RankingsResult<RankingTable> + Send + Sync>;

/// Holds the rankings table, loaded on first use and kept until [RankingStore::reset].
///
/// The lock is held while loading: concurrent callers wait for the first load instead of
/// reading the workbook again. A failed load leaves the store empty.
pub struct RankingStore {
    loader: TableLoader,
    names: NameReconciler,
    cached: Mutex<Option<Arc<RankingTable>>>,
}

impl RankingStore {
    pub fn from_source(source: SourceSettings, names: NameReconciler) -> RankingStore {
        RankingStore::from_loader(move || read_workbook(&source), names)
    }

    pub fn from_loader<F>(loader: F, names: NameReconciler) -> RankingStore
    where
        F: Fn() -> RankingsResult<RankingTable> + Send + Sync + 'static,
    {
        RankingStore {
            loader: Box::new(loader),
            names,
            cached: Mutex::new(None),
        }
    }

    pub fn read_data(&self) -> RankingsResult<Arc<RankingTable>> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = cached.as_ref() {
            debug!("read_data: using the cached table");
            return Ok(table.clone());
        }
        info!("read_data: loading the rankings table");
        let table = Arc::new((self.loader)()?);
        *cached = Some(table.clone());
        Ok(table)
    }

    pub fn is_loaded(&self) -> bool {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drops the cached table. The next access reads the source again.
    pub fn reset(&self) {
        *self.cached.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn get_metric(&self, name: &str, metric: Column) -> RankingsResult<f64> {
        let table = self.read_data()?;
        let resolver = Resolver::new(&table, &self.names);
        resolver.metric(name, metric).context(ResolvingSnafu {})
    }

    pub fn get_score_table<S: AsRef<str>>(&self, names: &[S]) -> RankingsResult<ScoreTable> {
        let table = self.read_data()?;
        let resolver = Resolver::new(&table, &self.names);
        build_score_table(&resolver, names).context(ResolvingSnafu {})
    }
}

/// The store behind [read_data], [get_metric] and [get_score_table]: the default
/// workbook location with the static name tables.
pub fn default_store() -> &'static RankingStore {
    static STORE: OnceLock<RankingStore> = OnceLock::new();
    STORE.get_or_init(|| {
        RankingStore::from_source(SourceSettings::default(), NameReconciler::default())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use qs_rankings::RawCell;

    fn row(name: &str, rank_2022: &str, score: f64) -> Vec<RawCell> {
        let mut row = vec![RawCell::Empty; Column::COUNT];
        row[Column::Rank2022.position()] = RawCell::text(rank_2022);
        row[Column::InstitutionName.position()] = RawCell::text(name);
        row[Column::ClassificationAge.position()] = RawCell::Int(4);
        row[Column::OverallScore.position()] = RawCell::Float(score);
        row
    }

    fn counting_store(count: Arc<AtomicUsize>) -> RankingStore {
        RankingStore::from_loader(
            move || {
                count.fetch_add(1, Ordering::SeqCst);
                RankingTable::from_rows(vec![
                    row("UCL", "8", 95.0),
                    row("Imperial College London", "7=", 96.5),
                    row("Sciences Po ", "242", 40.0),
                ])
                .context(BuildingTableSnafu { path: "memory" })
            },
            NameReconciler::default(),
        )
    }

    #[test]
    fn loads_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let store = counting_store(count.clone());
        assert!(!store.is_loaded());
        let t1 = store.read_data().unwrap();
        let t2 = store.read_data().unwrap();
        assert!(Arc::ptr_eq(&t1, &t2));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(store.is_loaded());
    }

    #[test]
    fn reset_reloads_equal_content() {
        let count = Arc::new(AtomicUsize::new(0));
        let store = counting_store(count.clone());
        let t1 = store.read_data().unwrap();
        store.reset();
        assert!(!store.is_loaded());
        let t2 = store.read_data().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(!Arc::ptr_eq(&t1, &t2));
        assert_eq!(t1.shape(), t2.shape());
        assert_eq!(
            format!("{:?}", t1.column(Column::Rank2022)),
            format!("{:?}", t2.column(Column::Rank2022))
        );
    }

    #[test]
    fn concurrent_readers_share_one_load() {
        let count = Arc::new(AtomicUsize::new(0));
        let store = Arc::new(counting_store(count.clone()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || store.read_data().map(|t| t.num_rows()).ok())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), Some(3));
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let store = RankingStore::from_loader(
            move || {
                c.fetch_add(1, Ordering::SeqCst);
                whatever!("no workbook")
            },
            NameReconciler::default(),
        );
        assert!(store.read_data().is_err());
        assert!(store.get_metric("UCL", Column::OverallScore).is_err());
        assert!(!store.is_loaded());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn metrics_through_the_store() {
        let store = counting_store(Arc::new(AtomicUsize::new(0)));
        assert_eq!(
            store.get_metric("University College London", Column::OverallScore).unwrap(),
            95.0
        );
        assert!(store
            .get_metric("EM Lyon", Column::OverallScore)
            .unwrap()
            .is_nan());
        assert!(matches!(
            store.get_metric("Nowhere", Column::OverallScore),
            Err(RankingsError::Resolving { .. })
        ));
        let scores = store
            .get_score_table(&["Sciences-Po Paris", "UCL", "Imperial College"])
            .unwrap();
        assert_eq!(
            scores.names(),
            vec!["Imperial College", "UCL", "Sciences-Po Paris"]
        );
    }

    #[test]
    fn missing_default_workbook_is_an_error() {
        let store = RankingStore::from_source(
            SourceSettings {
                workbook_path: "/nonexistent/qs.xlsx".into(),
                ..SourceSettings::default()
            },
            NameReconciler::default(),
        );
        assert!(matches!(
            store.read_data(),
            Err(RankingsError::OpeningExcel { .. })
        ));
    }
}
