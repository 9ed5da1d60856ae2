use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// `ctk`: manage clients, projects and samples, and print strength reports.
#[derive(Debug, Parser)]
#[command(name = "ctk", version, about = "ConcreTrack - concrete testing lab backoffice")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// How results are printed
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log loader and report steps at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file (overrides `database.path` from configuration)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
        }
    }
}
