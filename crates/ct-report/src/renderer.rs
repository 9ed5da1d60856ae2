//! HTML → PDF rendering seam.
//!
//! [`DocumentRenderer`] is the narrow interface the compositor talks to. The
//! production adapter, [`WkHtmlToPdf`], drives an external `wkhtmltopdf`
//! process; tests substitute an in-process fake.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use ct_config::{Orientation, PageConfig};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::ReportError;

/// Page layout passed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub orientation: Orientation,
    pub page_size: String,
    pub margin_top_mm: u32,
    pub margin_bottom_mm: u32,
    pub margin_left_mm: u32,
    pub margin_right_mm: u32,
    pub encoding: String,
    pub allow_local_file_access: bool,
}

impl From<&PageConfig> for RenderOptions {
    fn from(page: &PageConfig) -> Self {
        Self {
            orientation: page.orientation,
            page_size: page.size.clone(),
            margin_top_mm: page.margin_top_mm,
            margin_bottom_mm: page.margin_bottom_mm,
            margin_left_mm: page.margin_left_mm,
            margin_right_mm: page.margin_right_mm,
            encoding: page.encoding.clone(),
            allow_local_file_access: page.allow_local_file_access,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&PageConfig::default())
    }
}

impl RenderOptions {
    /// Command-line flags in `wkhtmltopdf` syntax, without input and output.
    #[must_use]
    pub fn wkhtmltopdf_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(15);
        if self.allow_local_file_access {
            args.push("--enable-local-file-access".to_string());
        }
        args.extend([
            "--encoding".to_string(),
            self.encoding.clone(),
            "--orientation".to_string(),
            self.orientation.as_str().to_string(),
            "--page-size".to_string(),
            self.page_size.clone(),
            "--margin-top".to_string(),
            format!("{}mm", self.margin_top_mm),
            "--margin-bottom".to_string(),
            format!("{}mm", self.margin_bottom_mm),
            "--margin-left".to_string(),
            format!("{}mm", self.margin_left_mm),
            "--margin-right".to_string(),
            format!("{}mm", self.margin_right_mm),
        ]);
        args
    }
}

/// Turns HTML into a document written at `output`.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Render `html` and write the document to `output`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Render` carrying the renderer's failure text.
    async fn render(
        &self,
        html: &[u8],
        options: &RenderOptions,
        output: &Path,
    ) -> Result<(), ReportError>;
}

/// Renders through an external `wkhtmltopdf` process.
///
/// HTML is streamed on stdin (`-`), the PDF goes to the output path, and
/// stderr is captured into the error on a non-zero exit.
#[derive(Debug, Clone)]
pub struct WkHtmlToPdf {
    binary: String,
}

impl WkHtmlToPdf {
    #[must_use]
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for WkHtmlToPdf {
    fn default() -> Self {
        Self::new("wkhtmltopdf")
    }
}

#[async_trait]
impl DocumentRenderer for WkHtmlToPdf {
    async fn render(
        &self,
        html: &[u8],
        options: &RenderOptions,
        output: &Path,
    ) -> Result<(), ReportError> {
        let mut child = Command::new(&self.binary)
            .args(options.wkhtmltopdf_args())
            .arg("-")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ReportError::Render(format!("{}: failed to start: {e}", self.binary)))?;

        // Write the whole body and close stdin before waiting on the process.
        let written = match child.stdin.take() {
            Some(mut stdin) => match stdin.write_all(html).await {
                Ok(()) => stdin.shutdown().await,
                Err(e) => Err(e),
            },
            None => Ok(()),
        };

        let outcome = child
            .wait_with_output()
            .await
            .map_err(|e| ReportError::Render(format!("{}: {e}", self.binary)))?;
        if !outcome.status.success() {
            let stderr = String::from_utf8_lossy(&outcome.stderr);
            tracing::warn!(binary = %self.binary, status = %outcome.status, "document renderer failed");
            return Err(ReportError::Render(format!(
                "{} error: {} - {}",
                self.binary,
                outcome.status,
                stderr.trim()
            )));
        }
        written.map_err(|e| ReportError::Render(format!("{}: writing input: {e}", self.binary)))?;

        tracing::debug!(binary = %self.binary, output = %output.display(), "document rendered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ct_core::errors::ErrorKind;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_options_produce_certified_layout_flags() {
        assert_eq!(
            RenderOptions::default().wkhtmltopdf_args(),
            vec![
                "--enable-local-file-access",
                "--encoding",
                "utf-8",
                "--orientation",
                "Landscape",
                "--page-size",
                "A4",
                "--margin-top",
                "15mm",
                "--margin-bottom",
                "15mm",
                "--margin-left",
                "10mm",
                "--margin-right",
                "10mm",
            ]
        );
    }

    #[test]
    fn local_file_access_can_be_disabled() {
        let options = RenderOptions {
            allow_local_file_access: false,
            orientation: Orientation::Portrait,
            ..RenderOptions::default()
        };
        let args = options.wkhtmltopdf_args();
        assert_eq!(args[0], "--encoding");
        assert!(args.contains(&"Portrait".to_string()));
    }

    #[tokio::test]
    async fn missing_binary_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = WkHtmlToPdf::new("concretrack-no-such-renderer");
        let err = renderer
            .render(b"<p>x</p>", &RenderOptions::default(), &dir.path().join("out.pdf"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Render);
        assert!(err.to_string().contains("failed to start"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_render_error() {
        // `sh` rejects the renderer flags and exits non-zero.
        let dir = tempfile::tempdir().unwrap();
        let renderer = WkHtmlToPdf::new("sh");
        let err = renderer
            .render(b"<p>x</p>", &RenderOptions::default(), &dir.path().join("out.pdf"))
            .await
            .unwrap_err();
        match err {
            ReportError::Render(message) => assert!(message.starts_with("sh error: "), "{message}"),
            other => panic!("expected a render error, got {other:?}"),
        }
    }
}
