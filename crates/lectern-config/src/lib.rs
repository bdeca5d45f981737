//! Configuration management for Lectern.
//!
//! Parses `lectern.toml` configuration files with serde and provides
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
//! Expanded fields:
//! - `sitemap.path`
//! - `links.base_path`

mod expand;

use std::path::{Path, PathBuf};

use lectern_xref::DuplicatePolicy;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override sitemap file path.
    pub sitemap_path: Option<PathBuf>,
    /// Override duplicate-key policy.
    pub duplicates: Option<DuplicatePolicy>,
    /// Override link base path.
    pub base_path: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "lectern.toml";

/// Default sitemap filename, relative to the config directory.
const DEFAULT_SITEMAP: &str = "sitemap.yaml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sitemap configuration (paths are relative strings from TOML).
    sitemap: SitemapConfigRaw,
    /// Link generation configuration.
    pub links: LinksConfig,

    /// Resolved sitemap configuration (set after loading).
    #[serde(skip)]
    pub sitemap_resolved: SitemapConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw sitemap configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SitemapConfigRaw {
    path: Option<String>,
    duplicates: Option<DuplicatePolicy>,
}

/// Resolved sitemap configuration with an absolute path.
#[derive(Debug, Default)]
pub struct SitemapConfig {
    /// Sitemap YAML file.
    pub path: PathBuf,
    /// How repeated path names or identifiers are handled.
    pub duplicates: DuplicatePolicy,
}

/// Link generation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Prefix for generated hrefs.
    pub base_path: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_owned(),
        }
    }
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
        /// Config field path (e.g., "`sitemap.path`").
        field: String,
        /// Error message (e.g., "${`SITEMAP`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `lectern.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
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
        if let Some(path) = &settings.sitemap_path {
            self.sitemap_resolved.path.clone_from(path);
        }
        if let Some(duplicates) = settings.duplicates {
            self.sitemap_resolved.duplicates = duplicates;
        }
        if let Some(base_path) = &settings.base_path {
            self.links.base_path.clone_from(base_path);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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
        Self {
            sitemap: SitemapConfigRaw::default(),
            links: LinksConfig::default(),
            sitemap_resolved: SitemapConfig {
                path: base.join(DEFAULT_SITEMAP),
                duplicates: DuplicatePolicy::default(),
            },
            config_path: None,
        }
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
        if self.sitemap_resolved.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "sitemap.path cannot be empty".to_owned(),
            ));
        }
        if self.links.base_path.is_empty() {
            return Err(ConfigError::Validation(
                "links.base_path cannot be empty".to_owned(),
            ));
        }
        if !self.links.base_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "links.base_path must start with /".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.sitemap.path {
            self.sitemap.path = Some(expand::expand_env(path, "sitemap.path")?);
        }
        self.links.base_path = expand::expand_env(&self.links.base_path, "links.base_path")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.sitemap_resolved = SitemapConfig {
            path: config_dir.join(self.sitemap.path.as_deref().unwrap_or(DEFAULT_SITEMAP)),
            duplicates: self.sitemap.duplicates.unwrap_or_default(),
        };
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.sitemap_resolved.path,
            PathBuf::from("/test/sitemap.yaml")
        );
        assert_eq!(config.sitemap_resolved.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.links.base_path, "/");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.links.base_path, "/");
        assert!(config.sitemap.path.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[sitemap]
path = "content/sitemap.yaml"
duplicates = "last-write-wins"

[links]
base_path = "/lectures/"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.sitemap_resolved.path,
            PathBuf::from("/project/content/sitemap.yaml")
        );
        assert_eq!(
            config.sitemap_resolved.duplicates,
            DuplicatePolicy::LastWriteWins
        );
        assert_eq!(config.links.base_path, "/lectures/");
    }

    #[test]
    fn test_parse_unknown_policy_fails() {
        let toml = r#"
[sitemap]
duplicates = "first-wins"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths_default_sitemap() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.sitemap_resolved.path,
            PathBuf::from("/project/sitemap.yaml")
        );
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            sitemap_path: Some(PathBuf::from("/custom/sitemap.yaml")),
            duplicates: Some(DuplicatePolicy::LastWriteWins),
            base_path: None,
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.sitemap_resolved.path,
            PathBuf::from("/custom/sitemap.yaml")
        );
        assert_eq!(
            config.sitemap_resolved.duplicates,
            DuplicatePolicy::LastWriteWins
        );
        assert_eq!(config.links.base_path, "/"); // Unchanged
    }

    #[test]
    fn test_validate_base_path() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.links.base_path = "lectures/".to_owned();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("links.base_path"));

        config.links.base_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lectern.toml");
        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lectern.toml");
        fs::write(&path, "[sitemap]\npath = \"site/sitemap.yaml\"\n").unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();
        assert_eq!(
            config.sitemap_resolved.path,
            temp_dir.path().join("site/sitemap.yaml")
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_cli_settings_after_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lectern.toml");
        fs::write(&path, "[links]\nbase_path = \"/a/\"\n").unwrap();

        let settings = CliSettings {
            base_path: Some("/b/".to_owned()),
            ..Default::default()
        };
        let config = Config::load(Some(path.as_path()), Some(&settings)).unwrap();
        assert_eq!(config.links.base_path, "/b/");
    }

    #[test]
    fn test_load_rejects_invalid_cli_base_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lectern.toml");
        fs::write(&path, "").unwrap();

        let settings = CliSettings {
            base_path: Some("relative".to_owned()),
            ..Default::default()
        };
        let result = Config::load(Some(path.as_path()), Some(&settings));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lectern.toml");
        fs::write(&path, "[sitemap\n").unwrap();

        let result = Config::load(Some(path.as_path()), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("lectures/vim");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("lectern.toml"), "").unwrap();

        let found = Config::discover_config(&nested).unwrap();
        assert_eq!(found, temp_dir.path().join("lectern.toml"));
    }
}
