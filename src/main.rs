use anyhow::Result;
use clap::Parser;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

use reqstat::cli::Cli;
use reqstat::config::AnalyzerConfig;
use reqstat::config_file::ConfigFile;
use reqstat::platform::{ExitCode, SafeOutput};

fn main() {
    let cli = process_args_with_config();
    init_logging(&cli);

    let config = AnalyzerConfig::from_cli(&cli);
    tracing::debug!(?config, "resolved configuration");

    match run(&config) {
        Ok(()) => ExitCode::Success.exit(),
        Err(e) => {
            eprintln!("reqstat: Error: {}", e);
            ExitCode::GeneralError.exit();
        }
    }
}

fn run(config: &AnalyzerConfig) -> Result<()> {
    let analysis = reqstat::analyze(config)?;

    let mut out = SafeOutput::stdout();
    out.writeln(&analysis.report)?;
    if let Some(path) = &analysis.saved_to {
        out.writeln(&format!("saved to {}", path.display()))?;
    }
    out.flush()?;

    if config.output.stats {
        eprintln!("{}", analysis.stats.format_stats());
    }

    Ok(())
}

/// `RUST_LOG` wins when set; otherwise the level follows -v/-q
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(cli.verbose, cli.quiet)));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn default_log_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    }
}

/// Extract --config-file argument from raw args
fn extract_config_file_arg(args: &[String]) -> Option<String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config-file" {
            return iter.next().cloned();
        }
        if let Some(path) = arg.strip_prefix("--config-file=") {
            return Some(path.to_string());
        }
    }
    None
}

/// Apply config file defaults and aliases, then parse with clap
fn process_args_with_config() -> Cli {
    let raw_args: Vec<String> = std::env::args().collect();

    if raw_args.iter().any(|arg| arg == "--show-config") {
        print!("{}", ConfigFile::describe());
        ExitCode::Success.exit();
    }

    let processed_args = if raw_args.iter().any(|arg| arg == "--ignore-config") {
        raw_args
    } else {
        let config_file_path = extract_config_file_arg(&raw_args);
        let loaded = ConfigFile::load_with_custom_path(config_file_path.as_deref())
            .and_then(|config_file| config_file.process_args(raw_args));
        match loaded {
            Ok(processed) => processed,
            Err(e) => {
                eprintln!("reqstat: Config error: {:#}", e);
                ExitCode::GeneralError.exit();
            }
        }
    };

    match Cli::try_parse_from(processed_args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too
            if e.use_stderr() {
                ExitCode::InvalidUsage.exit();
            }
            ExitCode::Success.exit();
        }
    }
}
