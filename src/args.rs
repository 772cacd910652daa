use clap::Parser;

/// Looks up the QS World University Rankings 2022 scores of lists of institutions.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file: workbook location, worksheet name, number of
    /// metadata rows, extra aliases and extra institutions known to be missing from the rankings.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If provided, uniranks
    /// will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Standard output is used by default.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The rankings workbook. Setting this option overrides the path that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default: the first worksheet) The name of the worksheet holding the rankings.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (bst, lfit or all, default all) The destination lists to tabulate.
    #[clap(short, long, value_parser)]
    pub list: Option<String>,

    /// (list of institution names) If specified, these names are tabulated instead of the destination
    /// lists.
    #[clap(short, long, value_parser)]
    pub name: Vec<String>,

    /// (institution name) Prints a single metric for this institution instead of tabulating.
    #[clap(long, value_parser)]
    pub lookup: Option<String>,

    /// (default OverallScore) The column to print with --lookup, for example Rank2022 or
    /// AcademicReputatationScore.
    #[clap(long, value_parser)]
    pub metric: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
