use std::path::PathBuf;

use clap::Subcommand;

/// Member entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MemberCommands {
    /// Insert a batch of members from a JSON array, all or nothing.
    Add {
        #[arg(long)]
        file: PathBuf,
        /// Assign every member in the file to this family.
        #[arg(long)]
        family: Option<i64>,
    },
}
