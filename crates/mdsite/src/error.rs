//! CLI error types.

use mdsite_config::ConfigError;
use mdsite_renderer::ConvertError;
use mdsite_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
