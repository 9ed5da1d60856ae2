use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Client { action } => commands::client::handle(&action, ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Family { action } => commands::family::handle(&action, ctx, flags).await,
        Commands::Member { action } => commands::member::handle(&action, ctx, flags).await,
        Commands::Report(args) => commands::report::handle(&args, ctx, flags).await,
    }
}
