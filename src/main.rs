mod args;

use clap::Parser;
use log::{debug, LevelFilter};

use uniranks::rankings::{run_report, ReportSettings};

fn main() {
    let args = args::Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if std::env::var("RUST_LOG").is_err() {
        builder.filter_level(LevelFilter::Info);
    }
    builder.init();

    debug!("args: {:?}", args);

    let settings = ReportSettings {
        config_path: args.config,
        input: args.input,
        worksheet_name: args.excel_worksheet_name,
        list: args.list,
        names: args.name,
        lookup: args.lookup,
        metric: args.metric,
        out: args.out,
        reference: args.reference,
    };

    if let Err(e) = run_report(&settings) {
        eprintln!("An error occured: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(s) = source {
            eprintln!("  caused by: {}", s);
            source = s.source();
        }
        std::process::exit(1);
    }
}
