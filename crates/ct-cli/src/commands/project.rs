use serde::Serialize;

use ct_core::entities::{NewProject, Project};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ProjectPageResponse {
    page: i64,
    page_size: u32,
    projects: Vec<Project>,
}

/// Handle `ctk project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Add { name, client } => {
            let project = ctx
                .service
                .save_project(&NewProject {
                    name: name.clone(),
                    client_id: *client,
                })
                .await?;
            output(&project, flags.format)
        }
        ProjectCommands::Get { id } => {
            let project = ctx.service.get_project_by_id(*id).await?;
            output(&project, flags.format)
        }
        ProjectCommands::List { page } => {
            let projects = ctx.service.get_projects(*page).await?;
            if flags.format == OutputFormat::Table {
                return output(&projects, flags.format);
            }
            output(
                &ProjectPageResponse {
                    page: *page,
                    page_size: ctx.service.page_size(),
                    projects,
                },
                flags.format,
            )
        }
    }
}
