use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::tracing_config::LogFormat;

/// CLI arguments for the stateflat binary.
#[derive(Parser, Debug)]
#[command(
    name = "stateflat",
    version,
    about = "Flatten labeled statement trees into jump-terminated blocks"
)]
pub struct CliArgs {
    /// JSON statement tree to flatten: an array of statements or a single
    /// statement. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    // ==================== Output ====================
    /// Output format.
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored error output.
    #[arg(long = "no-color", alias = "noColor")]
    pub no_color: bool,

    /// Check the produced blocks for open ends and dangling jumps.
    #[arg(long)]
    pub verify: bool,

    // ==================== Naming ====================
    /// Label meaning "control has left the state machine".
    #[arg(long = "exit-label", alias = "exitLabel")]
    pub exit_label: Option<String>,

    /// Prefix for compiler-generated block names.
    #[arg(long = "anonymous-prefix", alias = "anonymousPrefix")]
    pub anonymous_prefix: Option<String>,

    /// JSON config file with `exitLabel` / `anonymousPrefix` / `log` / `logFormat`.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // ==================== Diagnostics ====================
    /// Log filter: a level (`debug`) or `tracing` directives. Logs go to stderr.
    #[arg(long)]
    pub log: Option<String>,

    /// Log output format.
    #[arg(long = "log-format", alias = "logFormat", value_enum, ignore_case = true)]
    pub log_format: Option<LogFormat>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The block list as JSON.
    Json,
    /// A readable dump, one `name:` header per block.
    Text,
}
