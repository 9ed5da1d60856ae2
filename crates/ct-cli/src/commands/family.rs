use ct_core::entities::NewFamily;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FamilyCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ctk family`.
pub async fn handle(
    action: &FamilyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        FamilyCommands::Add {
            project,
            family_type,
            entry_date,
            radius,
            height,
            design,
            place,
        } => {
            // Families carry the client of their project.
            let owner = ctx.service.get_project_by_id(*project).await?;
            let family = ctx
                .service
                .save_family(&NewFamily {
                    family_type: family_type.clone(),
                    date_of_entry: *entry_date,
                    radius: *radius,
                    height: *height,
                    design_resistance: *design,
                    client_id: owner.client_id,
                    project_id: owner.id,
                    sample_place: place.clone(),
                })
                .await?;
            output(&family, flags.format)
        }
    }
}
