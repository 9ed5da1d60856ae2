use serde::Serialize;

use ct_core::entities::{Client, Project};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::subcommands::ClientCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ClientListResponse {
    clients: Vec<Client>,
}

#[derive(Debug, Serialize)]
struct ClientProjectsResponse {
    client_id: i64,
    projects: Vec<Project>,
}

/// Handle `ctk client`.
pub async fn handle(
    action: &ClientCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ClientCommands::Add { name } => {
            let client = ctx.service.save_client(name).await?;
            output(&client, flags.format)
        }
        ClientCommands::Get { id } => {
            let client = ctx.service.get_client(*id).await?;
            output(&client, flags.format)
        }
        ClientCommands::List => {
            let clients = ctx.service.list_clients().await?;
            if flags.format == OutputFormat::Table {
                return output(&clients, flags.format);
            }
            output(&ClientListResponse { clients }, flags.format)
        }
        ClientCommands::Projects { id } => {
            let projects = ctx.service.get_projects_by_client_id(*id).await?;
            output(
                &ClientProjectsResponse {
                    client_id: *id,
                    projects,
                },
                flags.format,
            )
        }
    }
}
