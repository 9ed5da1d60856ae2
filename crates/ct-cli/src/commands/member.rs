use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

use ct_core::entities::{Member, NewMember};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MemberCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct MemberBatchResponse {
    saved: usize,
    members: Vec<Member>,
}

/// Handle `ctk member`.
pub async fn handle(
    action: &MemberCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MemberCommands::Add { file, family } => {
            let batch = read_batch(file, *family)?;
            tracing::debug!(count = batch.len(), "saving member batch");
            let members = ctx.service.save_members(&batch).await?;
            output(
                &MemberBatchResponse {
                    saved: members.len(),
                    members,
                },
                flags.format,
            )
        }
    }
}

/// Parse a JSON array of members, optionally forcing every entry's family.
fn read_batch(path: &Path, family: Option<i64>) -> anyhow::Result<Vec<NewMember>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read member file '{}'", path.display()))?;
    let mut entries: Vec<Value> = serde_json::from_str(&text)
        .with_context(|| format!("'{}' is not a JSON array", path.display()))?;

    if let Some(family_id) = family {
        for entry in &mut entries {
            if let Value::Object(map) = entry {
                map.insert("family_id".to_string(), Value::from(family_id));
            }
        }
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry)
                .with_context(|| format!("member #{} in '{}' is invalid", index + 1, path.display()))
        })
        .collect()
}
