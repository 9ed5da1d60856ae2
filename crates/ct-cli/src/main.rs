use anyhow::Context;
use clap::Parser;
use ct_core::errors::ErrorKind;

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        match error_kind(&error) {
            Some(kind) => eprintln!("ctk error [{kind}]: {error:#}"),
            None => eprintln!("ctk error: {error:#}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let ctx = context::AppContext::init(&flags)
        .await
        .context("cannot open the ConcreTrack workspace")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let fallback = match (quiet, verbose) {
        (true, _) => "error",
        (false, true) => "debug",
        (false, false) => "warn",
    };
    // CONCRETRACK_LOG takes precedence over --quiet/--verbose.
    let filter = tracing_subscriber::EnvFilter::try_from_env("CONCRETRACK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("cannot install log subscriber: {error}"))?;

    Ok(())
}

/// The taxonomy kind of the first library error in the chain, if any.
fn error_kind(error: &anyhow::Error) -> Option<ErrorKind> {
    error.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<ct_report::ReportError>() {
            return Some(e.kind());
        }
        if let Some(e) = cause.downcast_ref::<ct_db::error::DatabaseError>() {
            return Some(e.kind());
        }
        cause.downcast_ref::<ct_core::errors::CoreError>().map(|e| e.kind())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_finds_wrapped_library_error() {
        let error = anyhow::Error::new(ct_db::error::DatabaseError::InvalidArgument(
            "page must be at least 1".into(),
        ))
        .context("listing projects");
        assert_eq!(error_kind(&error), Some(ErrorKind::InvalidArgument));
    }

    #[test]
    fn error_kind_is_none_for_plain_errors() {
        let error = anyhow::anyhow!("failed to read member file");
        assert_eq!(error_kind(&error), None);
    }
}
