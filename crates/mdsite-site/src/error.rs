//! Site build errors.

use std::path::{Path, PathBuf};

use mdsite_renderer::ConvertError;

/// Error returned while generating pages or copying static assets.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Directory to copy does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// Markdown page has no `# ` heading line.
    #[error("No title found in {}: expected a line starting with '# '", .0.display())]
    MissingTitle(PathBuf),
    /// Markdown page could not be converted.
    #[error("Failed to convert {}: {source}", .path.display())]
    Convert {
        path: PathBuf,
        #[source]
        source: ConvertError,
    },
    /// I/O error on a specific file or directory.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SiteError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
