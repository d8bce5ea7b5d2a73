use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "netcfg-audit")]
#[command(about = "Parse, validate, diff, and risk-score router/switch configurations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Show detected vendor and parsed structure of one config.
    Inspect(InspectArgs),
    /// Check one config against best-practice rules.
    Validate(ValidateArgs),
    /// Compare a running config against a golden baseline with risk scores.
    Diff(DiffArgs),
    /// Go/no-go gate for a proposed change.
    Review(ReviewArgs),
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Config file to inspect (`-` for stdin).
    pub file: PathBuf,
    /// Only print the detected vendor.
    #[arg(long)]
    pub detect: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Config file to validate (`-` for stdin).
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Optional rules TOML overriding the embedded table.
    #[arg(long)]
    pub rules_file: Option<PathBuf>,
    /// Exit nonzero when critical issues are found.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// Running (live) config file.
    pub running: PathBuf,
    /// Golden (approved baseline) config file.
    pub golden: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Only print risk score counters.
    #[arg(long)]
    pub summary: bool,
    /// Exit nonzero when critical findings exist.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Change proposal file (`-` for stdin); config snippet or prose.
    pub proposal: PathBuf,
    /// Optional current config for extra context.
    #[arg(long)]
    pub current: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Exit nonzero on a no-go decision.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Colorized report for terminals.
    Text,
    /// Structured report object.
    Json,
    /// Plain Markdown, as handed to the agent layer.
    Markdown,
}
