use std::path::PathBuf;

use clap::ValueEnum;

/// How command results are printed on stdout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Aligned text columns for lists of entities.
    Table,
    /// Compact single-line JSON, for piping.
    Raw,
}

/// Flags shared by every subcommand, resolved once after parsing.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    /// Overrides `database.path` from configuration.
    pub db: Option<PathBuf>,
}
