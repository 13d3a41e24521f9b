//! `mdsite build` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdsite_config::{CliSettings, Config};
use mdsite_site::{BuildConfig, SiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// URL prefix for root-relative links, e.g. `/my-repo/` (overrides config).
    #[arg(env = "MDSITE_BASEPATH")]
    pub(crate) basepath: Option<String>,

    /// Path to configuration file (default: auto-discover mdsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Markdown content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Static asset directory (overrides config).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Page template file (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Enable verbose output (shows each copied file and generated page).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            basepath: self.basepath,
            static_dir: self.static_dir,
            content_dir: self.content_dir,
            template: self.template,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config = ?config.config_path, "Loaded configuration");
        let site = config.site_resolved;

        output.info(&format!("Content: {}", site.content_dir.display()));
        output.info(&format!("Static: {}", site.static_dir.display()));
        output.info(&format!("Output: {}", site.output_dir.display()));

        let output_dir = site.output_dir.clone();
        let builder = SiteBuilder::new(BuildConfig {
            static_dir: site.static_dir,
            content_dir: site.content_dir,
            template: site.template,
            output_dir: site.output_dir,
            basepath: site.basepath,
        });
        let report = builder.build()?;

        if report.pages.is_empty() {
            output.warning("No markdown pages found");
        }
        output.success(&format!(
            "Built {} pages and copied {} files to {}",
            report.pages.len(),
            report.copied_files.len(),
            output_dir.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn args(config: PathBuf) -> BuildArgs {
        BuildArgs {
            basepath: Some("/docs/".to_owned()),
            config: Some(config),
            output_dir: None,
            content_dir: None,
            static_dir: None,
            template: None,
            verbose: false,
        }
    }

    #[test]
    fn test_execute_builds_site_from_config() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("static")).unwrap();
        fs::create_dir_all(root.join("content")).unwrap();
        fs::write(root.join("static/index.css"), "body {}").unwrap();
        fs::write(root.join("content/index.md"), "# Home\n\n[About](/about)").unwrap();
        fs::write(root.join("template.html"), "{{ Content }}").unwrap();
        let config = root.join("mdsite.toml");
        fs::write(&config, "[site]\noutput_dir = \"site\"\n").unwrap();

        args(config).execute().unwrap();

        assert!(root.join("site/index.css").exists());
        assert_eq!(
            fs::read_to_string(root.join("site/index.html")).unwrap(),
            r#"<div><h1>Home</h1><p><a href="/docs/about">About</a></p></div>"#
        );
    }

    #[test]
    fn test_execute_rejects_relative_basepath() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join("mdsite.toml");
        fs::write(&config, "").unwrap();

        let mut build = args(config);
        build.basepath = Some("docs/".to_owned());

        assert!(matches!(build.execute(), Err(CliError::Config(_))));
    }
}
