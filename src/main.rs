/*!
 * Command-line interface for folder-export
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use folder_export::config::{Args, Config};
use folder_export::exporter::Exporter;
use folder_export::report::{ReportFormat, Reporter};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let quiet = args.quiet;
    setup_logging(quiet, args.verbose);

    let config = Config::from_args(args);
    log::debug!("Resolved configuration: {:?}", config);

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let progress = ProgressBar::new_spinner();
        let template = "{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos} files ⏱️  {elapsed_precise}";
        if let Ok(style) = ProgressStyle::default_spinner().template(template) {
            progress.set_style(style);
        }
        progress.enable_steady_tick(std::time::Duration::from_millis(100));
        progress.set_prefix("📊 Exporting");
        progress.set_message(format!("📂 Scanning directory: {}", config.root_dir.display()));
        progress
    };

    let exporter = Exporter::new(config, Arc::new(progress.clone()));
    let result = exporter.export();

    // Clear the progress bar
    progress.finish_and_clear();

    match result {
        Ok(report) => {
            if !quiet {
                Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Export failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}
