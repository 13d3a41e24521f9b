//! `mdsite render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to convert.
    file: PathBuf,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markdown = std::fs::read_to_string(&self.file)?;
        let html = mdsite_renderer::markdown_to_html(&markdown)?;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{html}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_missing_file() {
        let args = RenderArgs {
            file: PathBuf::from("/nonexistent/page.md"),
        };
        assert!(matches!(args.execute(), Err(CliError::Io(_))));
    }

    #[test]
    fn test_render_invalid_markdown() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("page.md");
        std::fs::write(&file, "unclosed _italic").unwrap();

        let err = RenderArgs { file }.execute().unwrap_err();

        assert!(matches!(err, CliError::Convert(_)));
        assert_eq!(
            err.to_string(),
            "Invalid Markdown syntax: missing closing delimiter '_'"
        );
    }
}
