use clap::Subcommand;

/// Client entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ClientCommands {
    /// Create a client.
    Add { name: String },
    /// Get a client by ID.
    Get { id: i64 },
    /// List clients.
    List,
    /// Load every project commissioned by a client.
    Projects { id: i64 },
}
