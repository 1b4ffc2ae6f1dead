// CLI-specific types and structures
// This module contains the command-line interface definitions

use clap::Parser;

/// Input used when no paths are given on the command line
pub const DEFAULT_INPUT: &str = "logs/";

// CLI structure - contains all command-line arguments and options
#[derive(Parser, Debug)]
#[command(name = "reqstat")]
#[command(about = "Count request-log events per handler and severity across log files")]
#[command(
    long_about = "Count request-log events per handler and severity across log files\n\nInputs are .log, .txt or .logs files, or directories whose log files are read\n(one level deep). Files are aggregated in parallel and the summary table is\nprinted to stdout.\n\nCOMMON EXAMPLES:\n  reqstat logs/\n  reqstat app1.log app2.log --report weekly\n  reqstat /var/log/django -j 4 --stats"
)]
#[command(author = "Dirk Loss <mail@dirk-loss.de>")]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Log files or directories to analyze (defaults to "logs/")
    pub files: Vec<String>,

    /// Also save the report as <RESULTS_DIR>/<NAME>.txt
    #[arg(long = "report", value_name = "NAME", help_heading = "Output Options")]
    pub report: Option<String>,

    /// Directory for saved reports
    #[arg(
        long = "results-dir",
        value_name = "DIR",
        default_value = crate::report::DEFAULT_RESULTS_DIR,
        help_heading = "Output Options"
    )]
    pub results_dir: String,

    /// Print processing statistics to stderr
    #[arg(short = 's', long = "stats", help_heading = "Output Options")]
    pub stats: bool,

    /// Substring identifying request-channel lines
    #[arg(
        long = "channel",
        value_name = "MARKER",
        default_value = crate::parsers::request::DEFAULT_CHANNEL_MARKER,
        help_heading = "Processing Options"
    )]
    pub channel: String,

    /// Number of worker threads (0 = one per CPU)
    #[arg(
        short = 'j',
        long = "threads",
        default_value_t = 0,
        help_heading = "Performance Options"
    )]
    pub threads: usize,

    /// Increase diagnostic output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, help_heading = "Display Options")]
    pub verbose: u8,

    /// Only report errors on stderr
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose", help_heading = "Display Options")]
    pub quiet: bool,

    /// Use alias from configuration file
    #[arg(
        short = 'a',
        long = "alias",
        value_name = "NAME",
        conflicts_with = "ignore_config",
        help_heading = "Configuration Options"
    )]
    pub alias: Vec<String>,

    /// Read configuration from this file instead of the default locations
    #[arg(long = "config-file", value_name = "PATH", help_heading = "Configuration Options")]
    pub config_file: Option<String>,

    /// Show configuration file locations and active settings, then exit
    #[arg(long = "show-config", help_heading = "Configuration Options")]
    pub show_config: bool,

    /// Ignore configuration files
    #[arg(long = "ignore-config", help_heading = "Configuration Options")]
    pub ignore_config: bool,
}

impl Cli {
    /// Input paths, falling back to the default log directory
    pub fn input_paths(&self) -> Vec<String> {
        if self.files.is_empty() {
            vec![DEFAULT_INPUT.to_string()]
        } else {
            self.files.clone()
        }
    }
}
