//! Configuration management for mdsite.
//!
//! Parses `mdsite.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: every key of the `[site]` section.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override URL prefix for root-relative links.
    pub basepath: Option<String>,
    /// Override static asset directory.
    pub static_dir: Option<PathBuf>,
    /// Override markdown content directory.
    pub content_dir: Option<PathBuf>,
    /// Override page template file.
    pub template: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdsite.toml";

/// Default URL prefix: pages are served from the domain root.
const DEFAULT_BASEPATH: &str = "/";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    static_dir: Option<String>,
    content_dir: Option<String>,
    template: Option<String>,
    output_dir: Option<String>,
    basepath: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory copied verbatim into the output.
    pub static_dir: PathBuf,
    /// Directory of markdown pages.
    pub content_dir: PathBuf,
    /// HTML template with `{{ Title }}` and `{{ Content }}` placeholders.
    pub template: PathBuf,
    /// Generated site root; replaced on every build.
    pub output_dir: PathBuf,
    /// Prefix substituted for the leading `/` of `href` and `src` values.
    pub basepath: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.basepath`").
        field: String,
        /// Error message from the expansion.
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdsite.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The merged result
    /// is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let site = &mut self.site_resolved;
        if let Some(basepath) = &settings.basepath {
            site.basepath.clone_from(basepath);
        }
        if let Some(static_dir) = &settings.static_dir {
            site.static_dir.clone_from(static_dir);
        }
        if let Some(content_dir) = &settings.content_dir {
            site.content_dir.clone_from(content_dir);
        }
        if let Some(template) = &settings.template {
            site.template.clone_from(template);
        }
        if let Some(output_dir) = &settings.output_dir {
            site.output_dir.clone_from(output_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            site: SiteConfigRaw::default(),
            site_resolved: SiteConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let basepath = &self.site_resolved.basepath;
        require_non_empty(basepath, "site.basepath")?;
        if !basepath.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.basepath must start with '/', got '{basepath}'"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let site = &mut self.site;
        for (value, field) in [
            (&mut site.static_dir, "site.static_dir"),
            (&mut site.content_dir, "site.content_dir"),
            (&mut site.template, "site.template"),
            (&mut site.output_dir, "site.output_dir"),
            (&mut site.basepath, "site.basepath"),
        ] {
            if let Some(raw) = value {
                *raw = expand::expand_env(raw, field)?;
            }
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            static_dir: resolve(self.site.static_dir.as_deref(), "static"),
            content_dir: resolve(self.site.content_dir.as_deref(), "content"),
            template: resolve(self.site.template.as_deref(), "template.html"),
            output_dir: resolve(self.site.output_dir.as_deref(), "public"),
            basepath: self
                .site
                .basepath
                .clone()
                .unwrap_or_else(|| DEFAULT_BASEPATH.to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.site_resolved,
            SiteConfig {
                static_dir: PathBuf::from("/test/static"),
                content_dir: PathBuf::from("/test/content"),
                template: PathBuf::from("/test/template.html"),
                output_dir: PathBuf::from("/test/public"),
                basepath: "/".to_owned(),
            }
        );
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.site_resolved.basepath, "/");
        assert_eq!(
            config.site_resolved.content_dir,
            PathBuf::from("/project/content")
        );
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
static_dir = "assets"
content_dir = "pages"
template = "layout/page.html"
output_dir = "docs"
basepath = "/blog/"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.site_resolved,
            SiteConfig {
                static_dir: PathBuf::from("/project/assets"),
                content_dir: PathBuf::from("/project/pages"),
                template: PathBuf::from("/project/layout/page.html"),
                output_dir: PathBuf::from("/project/docs"),
                basepath: "/blog/".to_owned(),
            }
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let toml = r#"
[site]
basepath = "/x/"

[extra]
anything = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.basepath.as_deref(), Some("/x/"));
    }

    #[test]
    fn test_apply_cli_settings_basepath() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            basepath: Some("/repo/".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site_resolved.basepath, "/repo/");
        assert_eq!(
            config.site_resolved.output_dir,
            PathBuf::from("/test/public")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_paths() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            static_dir: Some(PathBuf::from("/s")),
            content_dir: Some(PathBuf::from("/c")),
            template: Some(PathBuf::from("/t.html")),
            output_dir: Some(PathBuf::from("/o")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site_resolved.static_dir, PathBuf::from("/s"));
        assert_eq!(config.site_resolved.content_dir, PathBuf::from("/c"));
        assert_eq!(config.site_resolved.template, PathBuf::from("/t.html"));
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/o"));
        assert_eq!(config.site_resolved.basepath, "/"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.site_resolved, config_before.site_resolved);
    }

    #[test]
    fn test_expand_env_vars_basepath() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_MDSITE_BASEPATH", "/from-env/");
        }

        let toml = r#"
[site]
basepath = "${TEST_MDSITE_BASEPATH}"
output_dir = "${TEST_MDSITE_UNSET_OUT:-build}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site_resolved.basepath, "/from-env/");
        assert_eq!(
            config.site_resolved.output_dir,
            PathBuf::from("/project/build")
        );

        unsafe {
            std::env::remove_var("TEST_MDSITE_BASEPATH");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_MDSITE_TEST");
        }

        let toml = r#"
[site]
template = "${MISSING_VAR_MDSITE_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_MDSITE_TEST"));
        assert!(err.to_string().contains("site.template"));
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_basepath_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.basepath = String::new();
        assert_validation_error(&config, &["site.basepath", "empty"]);
    }

    #[test]
    fn test_validate_basepath_relative() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.basepath = "blog/".to_owned();
        assert_validation_error(&config, &["site.basepath", "'/'"]);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/mdsite.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\ncontent_dir = \"md\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site_resolved.content_dir, dir.path().join("md"));
        assert_eq!(config.site_resolved.output_dir, dir.path().join("public"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_and_validates_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            basepath: Some("no-slash".to_owned()),
            ..Default::default()
        };
        let result = Config::load(Some(&path), Some(&settings));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site\nbroken").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
