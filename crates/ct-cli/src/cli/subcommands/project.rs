use clap::Subcommand;

/// Project entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        client: i64,
    },
    /// Get a project with its client, families and members.
    Get { id: i64 },
    /// List projects one page at a time.
    List {
        #[arg(long, default_value_t = 1)]
        page: i64,
    },
}
