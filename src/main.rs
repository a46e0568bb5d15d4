//! PDF Link Cleaner - Command Line Interface
//! Author: kartik4091
//! Created: 2025-06-06
//!
//! Removes embedded URI links from every marked PDF in the given directories.

use std::path::PathBuf;
use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pdf_link_cleaner::utils::logger::LOG_LEVELS;
use pdf_link_cleaner::{CleanerConfig, Logger, Pipeline};
use tracing::{debug, error, info, warn};

fn main() {
    let matches = build_cli().get_matches();

    let mut logger = if matches.get_flag("quiet") {
        Logger::quiet()
    } else {
        let level = matches
            .get_one::<String>("verbose")
            .map(String::as_str)
            .unwrap_or("info");
        Logger::with_level(level)
    };
    logger.init();

    info!("PDF Link Cleaner v{} - Starting...", env!("CARGO_PKG_VERSION"));

    let config = match build_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };
    debug!("Effective configuration: {:?}", config);

    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let report = match pipeline.execute() {
        Ok(report) => report,
        Err(e) => {
            error!("Batch aborted: {}", e);
            process::exit(1);
        }
    };
    report.log_summary();
    if report.has_failures() {
        warn!(
            "{} file(s) failed, see the log above for details",
            report.summary.failed
        );
    }

    if let Some(path) = &pipeline.config().report {
        if let Err(e) = report.write_json(path) {
            error!("Failed to write report: {}", e);
        }
    }
}

/// Start from the configuration file, if any, and let flags override it.
fn build_config(matches: &ArgMatches) -> pdf_link_cleaner::Result<CleanerConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => CleanerConfig::load(path)?,
        None => CleanerConfig::default(),
    };

    if let Some(dirs) = matches.get_many::<PathBuf>("dir") {
        config.directories = dirs.cloned().collect();
    }
    if let Some(uris) = matches.get_many::<String>("uri") {
        config.uri_patterns = uris.cloned().collect();
    }
    if let Some(prefix) = matches.get_one::<char>("prefix") {
        config.prefix = Some(*prefix);
    }
    if matches.get_flag("no-prefix") {
        config.prefix = None;
    }
    if let Some(number) = matches.get_one::<usize>("number") {
        config.start_page = *number;
    }
    if let Some(jobs) = matches.get_one::<usize>("jobs") {
        config.jobs = Some(*jobs);
    }
    if let Some(report) = matches.get_one::<PathBuf>("report") {
        config.report = Some(report.clone());
    }
    config.replace |= matches.get_flag("replace");
    config.recursive |= matches.get_flag("recursive");
    config.dry_run |= matches.get_flag("dry-run");

    Ok(config)
}

fn build_cli() -> Command {
    Command::new("pdf-link-cleaner")
        .version(env!("CARGO_PKG_VERSION"))
        .author("kartik4091")
        .about("Removes embedded URI links from PDF documents")
        .long_about(
            "Scans every marked PDF in the given directories for a link whose URI matches \
             one of the given patterns, removes the key carrying it from each page and \
             drops matching link annotations. Cleaned copies are written without the \
             prefix marker in their file name.",
        )
        // Input selection
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .value_name("DIR")
                .num_args(1..)
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("Directories holding PDF files"),
        )
        .arg(
            Arg::new("uri")
                .short('u')
                .long("uri")
                .value_name("REGEX")
                .num_args(1..)
                .action(ArgAction::Append)
                .help("URI patterns, tried in order"),
        )
        .arg(
            Arg::new("prefix")
                .short('p')
                .long("prefix")
                .value_name("CHAR")
                .value_parser(value_parser!(char))
                .help("Only process files whose name contains CHAR (default '_')"),
        )
        .arg(
            Arg::new("no-prefix")
                .long("no-prefix")
                .action(ArgAction::SetTrue)
                .conflicts_with("prefix")
                .help("Process every PDF and clean it in place"),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .action(ArgAction::SetTrue)
                .help("Descend into sub-directories"),
        )
        // Processing options
        .arg(
            Arg::new("number")
                .short('n')
                .long("number")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Page index to start scanning from"),
        )
        .arg(
            Arg::new("replace")
                .short('R')
                .long("replace")
                .action(ArgAction::SetTrue)
                .help("Delete the original once its cleaned copy is written"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Detect and remove links in memory without writing"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Number of worker threads"),
        )
        // Configuration and output
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file (JSON/YAML)"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Write a JSON batch report"),
        )
        // Logging
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .value_name("LEVEL")
                .value_parser(LOG_LEVELS)
                .help("Log level"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Log errors only"),
        )
}
