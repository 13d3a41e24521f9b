//! Full static site build.

use std::path::PathBuf;

use crate::copy::copy_dir_recursive;
use crate::error::SiteError;
use crate::page::generate_pages_recursive;

/// Inputs of a site build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory copied verbatim into `output_dir`.
    pub static_dir: PathBuf,
    /// Directory of markdown pages.
    pub content_dir: PathBuf,
    /// Page template file.
    pub template: PathBuf,
    /// Output root; replaced on every build.
    pub output_dir: PathBuf,
    /// Prefix for root-relative `href` and `src` values.
    pub basepath: String,
}

/// Files written by a build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Static files copied into the output directory.
    pub copied_files: Vec<PathBuf>,
    /// Generated HTML pages.
    pub pages: Vec<PathBuf>,
}

/// Builds a static site from a content directory and a static directory.
pub struct SiteBuilder {
    config: BuildConfig,
}

impl SiteBuilder {
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Copy static assets, then render every page into the output directory.
    ///
    /// # Errors
    ///
    /// Returns the first copy or page generation error. The output directory
    /// may be partially written in that case.
    pub fn build(&self) -> Result<BuildReport, SiteError> {
        let config = &self.config;
        tracing::info!(
            output = %config.output_dir.display(),
            basepath = %config.basepath,
            "Building site"
        );

        let copied_files = copy_dir_recursive(&config.static_dir, &config.output_dir)?;
        let pages = generate_pages_recursive(
            &config.content_dir,
            &config.template,
            &config.output_dir,
            &config.basepath,
        )?;

        Ok(BuildReport {
            copied_files,
            pages,
        })
    }
}
