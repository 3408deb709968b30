#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate log;

#[macro_use]
mod macros_private;

mod config;
mod format;
mod html;
mod model;
mod panel;
mod plot;
mod report;
mod stats;
mod summary;

lazy_static::lazy_static! {
    static ref DEBUG_ENABLED: bool = std::env::var_os("BENCH_REPORT_DEBUG").is_some();
}

/// Returns true if the BENCH_REPORT_DEBUG environment variable is defined,
/// enabling extra debug output.
pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = config::configure()?;
    init_logging(configuration.verbosity);

    let bench_report = elapsed!(
        "Loading the benchmark results",
        model::load(&configuration.input)
    )?;
    info!(
        "Loaded {} series from {:?}",
        bench_report.series.len(),
        configuration.input
    );

    let mut builder = report::ReportBuilder::new(&bench_report, &configuration);
    builder.generate()?;

    println!(
        "Report written to {:?}",
        configuration.output_dir.join("index.html")
    );

    Ok(())
}

fn init_logging(verbosity: u64) {
    use log::LevelFilter;
    use simplelog::{Config, SimpleLogger, TermLogger, TerminalMode};

    let filter = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    if TermLogger::init(filter, Config::default(), TerminalMode::Stderr).is_err() {
        let _ = SimpleLogger::init(filter, Config::default());
    }
}
