//! CLI: split one workbook into per-filter workbooks next to it.
//!
//! Usage:
//!   sheetsplit <input.xlsx>
//!   sheetsplit --no-open -q <input.xlsx>

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use sheetsplit::{
    LogProgressReporter, NoopProgressReporter, ProgressReporter, SpecSplitOptions, run_split,
};
use sheetsplit_io_fs::{FolderOpener, NoopFolderOpener, ReportSplit, SystemFolderOpener};
use sheetsplit_log::init_tracing;

#[derive(Debug, Parser)]
#[command(
    name = "sheetsplit",
    version,
    about = "Split spreadsheet rows by the values of columns B and D"
)]
struct Cli {
    /// Input workbook (.xlsx, .xlsm or .xls).
    input: PathBuf,

    /// Do not open the output folder when done.
    #[arg(long)]
    no_open: bool,

    /// Only print warnings and the final summary.
    #[arg(short, long)]
    quiet: bool,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(report) => {
            println!(
                "Data filtered and saved successfully. Log created: {}",
                report
                    .path_file_log
                    .as_deref()
                    .and_then(|path| path.file_name())
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default()
            );
            println!("{report}");
            println!("Output: {}", report.path_dir_out.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: An error occurred while processing the file: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ReportSplit> {
    let options = SpecSplitOptions {
        if_open_folder: !cli.no_open,
        ..SpecSplitOptions::default()
    };

    let mut progress_log = LogProgressReporter;
    let mut progress_noop = NoopProgressReporter;
    let progress: &mut dyn ProgressReporter = if cli.quiet {
        &mut progress_noop
    } else {
        &mut progress_log
    };

    let opener: &dyn FolderOpener = if cli.no_open {
        &NoopFolderOpener
    } else {
        &SystemFolderOpener
    };

    let report = run_split(&cli.input, options, progress, opener)?;
    Ok(report)
}
