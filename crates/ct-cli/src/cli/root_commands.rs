use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{ClientCommands, FamilyCommands, MemberCommands, ProjectCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Clients commissioning projects.
    Client {
        #[command(subcommand)]
        action: ClientCommands,
    },
    /// Projects with their families and members.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Sample families.
    Family {
        #[command(subcommand)]
        action: FamilyCommands,
    },
    /// Test specimens.
    Member {
        #[command(subcommand)]
        action: MemberCommands,
    },
    /// Generate the PDF report for one family.
    Report(ReportArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Project id.
    #[arg(long)]
    pub project: i64,
    /// Family id within the project.
    #[arg(long)]
    pub family: i64,
    /// Directory to write the PDF into (defaults to the current directory).
    #[arg(long)]
    pub out: Option<PathBuf>,
}
