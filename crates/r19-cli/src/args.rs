use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the r19lint binary.
#[derive(Parser, Debug)]
#[command(
    name = "r19lint",
    version,
    about = "Find and fix React APIs removed in React 19"
)]
pub struct CliArgs {
    /// Files or directories to lint.
    #[arg(value_name = "PATHS", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Apply fixes and write the results back to disk.
    #[arg(long)]
    pub fix: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Run only the named rule. May be repeated.
    #[arg(long = "rule", value_name = "NAME")]
    pub rules: Vec<String>,

    /// Path to a config file (defaults to `r19lint.json` in the working directory).
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Fail when more than this many warnings are reported.
    #[arg(long = "max-warnings", value_name = "N")]
    pub max_warnings: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
