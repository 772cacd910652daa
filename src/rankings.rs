use log::{debug, info, warn};
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use qs_rankings::{
    Column, ParseColumnError, RankingTable, ResolveError, ScoreTable, TableError,
    BST_DESTINATIONS, LFIT_DESTINATIONS,
};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
pub mod io_common;
pub mod io_xlsx;
pub mod store;

pub use crate::rankings::config_reader::*;
pub use crate::rankings::store::*;

#[derive(Debug, Snafu)]
pub enum RankingsError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Workbook {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {worksheet:?} not found in {path}"))]
    MissingWorksheet { worksheet: String, path: String },
    #[snafu(display("Cannot build the rankings table from {path}"))]
    BuildingTable { source: TableError, path: String },
    #[snafu(display("Error opening {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Lookup failed"))]
    Resolving { source: ResolveError },
    #[snafu(display("Invalid metric"))]
    UnknownMetric { source: ParseColumnError },
    #[snafu(display("Configuration file {path} has no parent directory"))]
    MissingParentDir { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RankingsResult<T> = Result<T, RankingsError>;

/// The rankings table, read from the default workbook on first use.
pub fn read_data() -> RankingsResult<Arc<RankingTable>> {
    default_store().read_data()
}

/// The value of `metric` for an institution, following the alias table and the list of
/// institutions missing from the rankings.
pub fn get_metric(name: &str, metric: Column) -> RankingsResult<f64> {
    default_store().get_metric(name, metric)
}

/// The 2022 rank and overall score of each name, sorted by rank.
pub fn get_score_table<S: AsRef<str>>(names: &[S]) -> RankingsResult<ScoreTable> {
    default_store().get_score_table(names)
}

/// Forgets the table read by [read_data]. Meant for tests.
pub fn reset_data() {
    default_store().reset()
}

/// What the command line asks for.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ReportSettings {
    pub config_path: Option<String>,
    pub input: Option<String>,
    pub worksheet_name: Option<String>,
    /// bst, lfit or all (the default).
    pub list: Option<String>,
    /// Replaces the destination lists when not empty.
    pub names: Vec<String>,
    pub lookup: Option<String>,
    pub metric: Option<String>,
    pub out: Option<String>,
    pub reference: Option<String>,
}

fn score_table_to_json(list: &str, table: &ScoreTable) -> JSValue {
    let rows: Vec<JSValue> = table
        .rows
        .iter()
        .map(|r| {
            json!({
                "index": r.index,
                "name": r.name,
                "rank2022": r.rank_2022,
                "score": r.score,
            })
        })
        .collect();
    json!({"list": list, "rows": rows})
}

fn selected_lists(settings: &ReportSettings) -> RankingsResult<Vec<(String, Vec<String>)>> {
    let to_vec = |l: &[&str]| l.iter().map(|s| s.to_string()).collect::<Vec<String>>();
    if !settings.names.is_empty() {
        return Ok(vec![("names".to_string(), settings.names.clone())]);
    }
    let res = match settings.list.as_deref().unwrap_or("all") {
        "bst" => vec![("bst".to_string(), to_vec(BST_DESTINATIONS))],
        "lfit" => vec![("lfit".to_string(), to_vec(LFIT_DESTINATIONS))],
        "all" => vec![
            ("bst".to_string(), to_vec(BST_DESTINATIONS)),
            ("lfit".to_string(), to_vec(LFIT_DESTINATIONS)),
        ],
        x => whatever!("Unknown destination list {:?}: use bst, lfit or all", x),
    };
    Ok(res)
}

fn build_store(settings: &ReportSettings) -> RankingsResult<RankingStore> {
    let (config, root) = match &settings.config_path {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu { path: config_path })?
                .to_path_buf();
            (config, root)
        }
        None => (RankingsConfig::default(), Path::new(".").to_path_buf()),
    };
    info!("config: {:?}", config);
    let mut source = config.source_settings(&root);
    if let Some(input) = &settings.input {
        source.workbook_path = input.into();
    }
    if let Some(worksheet_name) = &settings.worksheet_name {
        source.worksheet_name = Some(worksheet_name.clone());
    }
    debug!("build_store: source: {:?}", source);
    Ok(RankingStore::from_source(source, config.name_reconciler()))
}

/// Builds the JSON summary for the selected lists.
pub fn build_summary_js(
    store: &RankingStore,
    settings: &ReportSettings,
) -> RankingsResult<JSValue> {
    let mut tables: Vec<JSValue> = Vec::new();
    for (list, names) in selected_lists(settings)? {
        let scores = store.get_score_table(&names)?;
        for r in scores.rows.iter() {
            info!(
                "{:>3} {:>7} {:>6} {}",
                r.index, r.rank_2022, r.score, r.name
            );
        }
        tables.push(score_table_to_json(&list, &scores));
    }
    Ok(json!({ "tables": tables }))
}

fn write_output(out: Option<&str>, contents: &str) -> RankingsResult<()> {
    match out {
        None | Some("stdout") => {
            println!("{}", contents);
            Ok(())
        }
        Some(path) => fs::write(path, contents).context(WritingOutputSnafu { path }),
    }
}

fn check_reference(reference_path: &str, pretty_js: &str) -> RankingsResult<()> {
    let reference = read_reference(reference_path)?;
    let pretty_reference = serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    if pretty_reference != pretty_js {
        warn!("Found differences with the reference {}", reference_path);
        print_diff(pretty_reference.as_str(), pretty_js, "\n");
        whatever!(
            "Difference detected between the computed scores and the reference {}",
            reference_path
        )
    }
    info!("Scores match the reference {}", reference_path);
    Ok(())
}

pub fn run_report(settings: &ReportSettings) -> RankingsResult<()> {
    let store = build_store(settings)?;

    if let Some(name) = &settings.lookup {
        let metric: Column = settings
            .metric
            .as_deref()
            .unwrap_or("OverallScore")
            .parse()
            .context(UnknownMetricSnafu {})?;
        let value = store.get_metric(name, metric)?;
        let js = json!({"name": name, "metric": metric.name(), "value": value});
        let pretty_js = serde_json::to_string_pretty(&js).context(ParsingJsonSnafu {})?;
        return write_output(settings.out.as_deref(), &pretty_js);
    }

    let summary_js = build_summary_js(&store, settings)?;
    let pretty_js = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    write_output(settings.out.as_deref(), &pretty_js)?;

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &settings.reference {
        check_reference(reference_path, &pretty_js)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rankings::io_xlsx::table_from_range;
    use crate::rankings::io_xlsx::tests::{s, workbook_range, workbook_row};
    use calamine::DataType;
    use qs_rankings::{ABSENT, ALIASES, DType, EXPECTED_ROWS, NameReconciler};
    use std::collections::HashSet;

    fn memory_store() -> RankingStore {
        RankingStore::from_loader(
            || {
                let range = workbook_range(&[
                    workbook_row("UCL", DataType::Float(8.0), DataType::Float(95.0)),
                    workbook_row("Imperial College London", s("7="), DataType::Float(96.5)),
                    workbook_row("Sorbonne University", s("72"), DataType::Float(62.3)),
                    workbook_row("Sciences Po ", s("242"), DataType::Float(39.9)),
                    workbook_row("University of Oxford", s("2"), s("-")),
                ]);
                table_from_range(&range, 4).context(BuildingTableSnafu { path: "memory" })
            },
            NameReconciler::default(),
        )
    }

    #[test]
    fn summary_json() {
        let store = memory_store();
        let settings = ReportSettings {
            names: vec![
                "Sciences-Po Paris".to_string(),
                "EM Lyon".to_string(),
                "University of Oxford".to_string(),
                "Universités de Paris La Sorbonne".to_string(),
            ],
            ..Default::default()
        };
        let js = build_summary_js(&store, &settings).unwrap();
        assert_eq!(
            js,
            json!({"tables": [{"list": "names", "rows": [
                {"index": 0, "name": "University of Oxford", "rank2022": 2.0, "score": null},
                {"index": 1, "name": "Universités de Paris La Sorbonne", "rank2022": 72.0, "score": 62.3},
                {"index": 2, "name": "Sciences-Po Paris", "rank2022": 242.0, "score": 39.9},
                {"index": 3, "name": "EM Lyon", "rank2022": null, "score": null},
            ]}]})
        );
    }

    #[test]
    fn list_selection() {
        let lists = selected_lists(&ReportSettings::default()).unwrap();
        let names: Vec<&str> = lists.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(names, vec!["bst", "lfit"]);
        assert_eq!(lists[0].1.len(), BST_DESTINATIONS.len());

        let settings = ReportSettings {
            list: Some("lfit".to_string()),
            ..Default::default()
        };
        let lists = selected_lists(&settings).unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].1.len(), LFIT_DESTINATIONS.len());

        let settings = ReportSettings {
            list: Some("other".to_string()),
            ..Default::default()
        };
        assert!(selected_lists(&settings).is_err());
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let settings = ReportSettings {
            input: Some("/nonexistent/qs.xlsx".to_string()),
            lookup: Some("UCL".to_string()),
            metric: Some("Score".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            run_report(&settings),
            Err(RankingsError::UnknownMetric { .. })
        ));
    }

    #[test]
    fn lookup_with_missing_workbook_fails() {
        let settings = ReportSettings {
            input: Some("/nonexistent/qs.xlsx".to_string()),
            lookup: Some("UCL".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            run_report(&settings),
            Err(RankingsError::OpeningExcel { .. })
        ));
    }

    #[test]
    fn output_file_and_reference() {
        let dir = std::env::temp_dir().join(format!("uniranks-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let out = dir.join("summary.json");
        let contents = serde_json::to_string_pretty(&json!({"tables": []})).unwrap();
        write_output(out.to_str(), &contents).unwrap();
        assert!(check_reference(out.to_str().unwrap(), &contents).is_ok());
        let other = serde_json::to_string_pretty(&json!({"tables": [1]})).unwrap();
        assert!(check_reference(out.to_str().unwrap(), &other).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }

    // The tests below need the QS 2022 results workbook at its default location.

    #[test]
    #[ignore = "needs assets/2022_QS_World_University_Rankings_Results_public_version.xlsx"]
    fn read_data_shape_and_dtypes() {
        let table = read_data().unwrap();
        assert_eq!(table.shape(), (EXPECTED_ROWS, 25));
        let expected = vec![
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Text,
            DType::Text,
            DType::Text,
            DType::Text,
            DType::Text,
            DType::Text,
            DType::Int,
            DType::Text,
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Float,
            DType::Float,
        ];
        let dtypes: Vec<DType> = table.dtypes().into_iter().map(|(_, d)| d).collect();
        assert_eq!(dtypes, expected);
        let again = read_data().unwrap();
        assert!(Arc::ptr_eq(&table, &again));
    }

    #[test]
    #[ignore = "needs assets/2022_QS_World_University_Rankings_Results_public_version.xlsx"]
    fn every_destination_resolves() {
        let names: HashSet<&str> = BST_DESTINATIONS
            .iter()
            .chain(LFIT_DESTINATIONS.iter())
            .copied()
            .collect();
        for name in names {
            if let Err(e) = get_metric(name, Column::OverallScore) {
                panic!("{:?}: {}", name, e);
            }
        }
        for name in ABSENT.iter() {
            assert!(get_metric(name, Column::OverallScore).unwrap().is_nan());
        }
        let table = read_data().unwrap();
        for (alias, canonical) in ALIASES.iter() {
            if table.rows_named(canonical).len() == 1 {
                assert_eq!(
                    format!("{:?}", get_metric(alias, Column::OverallScore).ok()),
                    format!("{:?}", get_metric(canonical, Column::OverallScore).ok())
                );
            }
        }
        let scores = get_score_table(BST_DESTINATIONS).unwrap();
        assert_eq!(scores.len(), BST_DESTINATIONS.len());
    }

    #[test]
    #[ignore = "needs assets/2022_QS_World_University_Rankings_Results_public_version.xlsx"]
    fn reset_reads_again() {
        let t1 = read_data().unwrap();
        reset_data();
        let t2 = read_data().unwrap();
        assert_eq!(t1.shape(), t2.shape());
        assert_eq!(t1.duplicate_names(), t2.duplicate_names());
    }
}
