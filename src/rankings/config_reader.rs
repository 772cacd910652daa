use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use qs_rankings::{NameReconciler, EXPECTED_ROWS};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::rankings::*;

pub const DEFAULT_WORKBOOK_PATH: &str =
    "assets/2022_QS_World_University_Rankings_Results_public_version.xlsx";

/// Metadata rows at the top of the results worksheet.
pub const DEFAULT_SKIP_ROWS: usize = 4;

/// The optional JSON configuration file. Every key may be left out.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingsConfig {
    #[serde(rename = "workbookPath")]
    pub workbook_path: Option<String>,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
    #[serde(rename = "skipRows")]
    pub skip_rows: Option<usize>,
    #[serde(rename = "expectedRows")]
    pub expected_rows: Option<usize>,
    #[serde(rename = "extraAbsent")]
    pub extra_absent: Option<Vec<String>>,
    #[serde(rename = "extraAliases")]
    pub extra_aliases: Option<BTreeMap<String, String>>,
}

/// Where and how to read the rankings workbook.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SourceSettings {
    pub workbook_path: PathBuf,
    /// The first worksheet is used when not provided.
    pub worksheet_name: Option<String>,
    pub skip_rows: usize,
    pub expected_rows: usize,
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings {
            workbook_path: PathBuf::from(DEFAULT_WORKBOOK_PATH),
            worksheet_name: None,
            skip_rows: DEFAULT_SKIP_ROWS,
            expected_rows: EXPECTED_ROWS,
        }
    }
}

impl RankingsConfig {
    /// `root` is the directory of the configuration file; relative workbook paths are
    /// resolved against it.
    pub fn source_settings(&self, root: &Path) -> SourceSettings {
        let default = SourceSettings::default();
        SourceSettings {
            workbook_path: match &self.workbook_path {
                Some(p) => root.join(p),
                None => default.workbook_path,
            },
            worksheet_name: self.worksheet_name.clone(),
            skip_rows: self.skip_rows.unwrap_or(default.skip_rows),
            expected_rows: self.expected_rows.unwrap_or(default.expected_rows),
        }
    }

    pub fn name_reconciler(&self) -> NameReconciler {
        let extra_absent = self.extra_absent.clone().unwrap_or_default();
        let extra_aliases: Vec<(String, String)> = self
            .extra_aliases
            .clone()
            .unwrap_or_default()
            .into_iter()
            .collect();
        NameReconciler::default().with_extra(&extra_absent, &extra_aliases)
    }
}

pub fn read_config(path: &str) -> RankingsResult<RankingsConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: RankingsConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_reference(path: &str) -> RankingsResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
