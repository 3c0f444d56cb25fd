//! Command-line interface implementation for templproc.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

use crate::constants::exit_code;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// Command-line arguments structure for templproc.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "templproc: replace placeholder patterns in templates with rows of values",
    long_about = None,
    disable_version_flag = true,
    after_help = "Examples:\n  \
        templproc -V \"server1,server2,server3\" -P \"@HOSTNAME@\" -T template.txt -r\n  \
        templproc -V servers.txt -P \"@HOST@,@IP@,@PORT@\" -T config.yaml -r\n  \
        templproc -V values.txt -P \"@VALUE@\" -T \"template_*.conf\" -r\n  \
        templproc -V partial.txt -P \"@HOST@\" -T template.yaml -r --force"
)]
pub struct Args {
    /// Comma-separated values, or a file with one row per line
    /// (fields separated by TAB, ';' or ','; '#' starts a comment)
    #[arg(short = 'V', long, alias = "Values", value_name = "VALUES")]
    pub values: String,

    /// Comma-separated patterns such as "@HOST@,@IP@" or "%HOST%,%IP%"
    #[arg(short = 'P', long, alias = "Pattern", value_name = "PATTERNS")]
    pub pattern: String,

    /// Template file, directory, or wildcard pattern (e.g. "template_*.txt")
    #[arg(short = 'T', long, alias = "Template", value_name = "TEMPLATE")]
    pub template: String,

    /// Write the output files (default is a dry run)
    #[arg(short, long)]
    pub run: bool,

    /// Warn about unmatched or leftover placeholders instead of failing
    #[arg(short, long)]
    pub force: bool,

    /// Project name, used as the output subdirectory (default: project_<pid>)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Directory in which the project directory is created (default: current directory)
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Enable verbose logging output (same as --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Allow lowercase letters in pattern names
    #[arg(long)]
    pub mixed_case: bool,

    /// Allow hyphens in pattern names
    #[arg(long)]
    pub allow_hyphen: bool,

    /// Accept templates with any file extension
    #[arg(long)]
    pub any_extension: bool,

    /// JSON or YAML file overriding limits and allowed extensions
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Remove files created by an interrupted run without asking
    #[arg(long)]
    pub skip_cleanup_check: bool,

    /// Print version
    #[arg(long, action = ArgAction::Version)]
    pub version: (),
}

impl Args {
    pub fn level_filter(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            self.log_level.into()
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With the invalid-input code after printing help if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(exit_code::INVALID_INPUT);
            } else {
                e.exit();
            }
        }
    }
}
