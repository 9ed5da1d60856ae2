use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use ct_report::ReportService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ReportResponse {
    filename: String,
    path: PathBuf,
    bytes: usize,
    content_type: &'static str,
}

/// Handle `ctk report`.
pub async fn handle(args: &ReportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let reports = ReportService::from_config(ctx.service.clone(), &ctx.config)?;
    let report = reports
        .generate_family_report(args.project, args.family)
        .await?;

    let dir = match &args.out {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    tokio::fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("failed to create '{}'", dir.display()))?;
    let path = dir.join(&report.filename);
    tokio::fs::write(&path, &report.bytes)
        .await
        .with_context(|| format!("failed to write '{}'", path.display()))?;

    output(
        &ReportResponse {
            filename: report.filename.clone(),
            path,
            bytes: report.bytes.len(),
            content_type: report.content_type(),
        },
        flags.format,
    )
}
