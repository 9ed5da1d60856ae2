use chrono::NaiveDate;
use clap::Subcommand;

/// Family entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FamilyCommands {
    /// Register a family of specimens for a project.
    Add {
        #[arg(long)]
        project: i64,
        /// Specimen type, e.g. cylinder.
        #[arg(long = "type", default_value = "cylinder")]
        family_type: String,
        /// Date the samples entered the lab (YYYY-MM-DD).
        #[arg(long)]
        entry_date: NaiveDate,
        /// Specimen radius in cm.
        #[arg(long)]
        radius: f64,
        /// Specimen height in cm.
        #[arg(long)]
        height: f64,
        /// Design resistance in psi.
        #[arg(long)]
        design: f64,
        /// Where on site the samples were taken.
        #[arg(long, default_value = "")]
        place: String,
    },
}
