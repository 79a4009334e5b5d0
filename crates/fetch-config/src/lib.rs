//! Configuration management for fetch.
//!
//! Parses the optional `~/.fetch.yaml` configuration file with serde. An
//! explicit file may be given instead (`--config <path>`).
//!
//! Values are layered in this order, later layers winning:
//!
//! 1. Built-in defaults
//! 2. The configuration file
//! 3. Environment variables (`FETCH_DEBUG`, `FETCH_STORE_DIR`,
//!    `FETCH_HTTP_TIMEOUT_SECS`, `FETCH_HTTP_USER_AGENT`)
//! 4. CLI settings via [`CliSettings`]
//!
//! ## Environment Variable Expansion
//!
//! String values in the file support `${VAR}` expansion, which errors if VAR
//! is unset. Expanded fields:
//! - `store.dir`
//! - `http.user_agent`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override debug logging.
    pub debug: Option<bool>,
}

/// Default configuration file, relative to the home directory.
const DEFAULT_CONFIG_PATH: &str = "~/.fetch.yaml";

/// Environment variable names for overrides.
const ENV_DEBUG: &str = "FETCH_DEBUG";
const ENV_STORE_DIR: &str = "FETCH_STORE_DIR";
const ENV_HTTP_TIMEOUT_SECS: &str = "FETCH_HTTP_TIMEOUT_SECS";
const ENV_HTTP_USER_AGENT: &str = "FETCH_HTTP_USER_AGENT";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enable debug logging.
    pub debug: bool,
    /// Document store configuration (paths are relative strings from YAML).
    store: StoreConfigRaw,
    /// HTTP client configuration.
    pub http: HttpConfig,

    /// Resolved store configuration (set after loading).
    #[serde(skip)]
    pub store_resolved: StoreConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw store configuration as parsed from YAML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct StoreConfigRaw {
    dir: Option<String>,
}

/// Resolved store configuration with absolute paths.
#[derive(Debug, Default)]
pub struct StoreConfig {
    /// Directory that holds `<site>.html` documents.
    pub dir: PathBuf,
}

/// HTTP client configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global request timeout in seconds. `None` means no timeout.
    pub timeout_secs: Option<u64>,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl HttpConfig {
    /// Request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: format!("fetch/{}", env!("CARGO_PKG_VERSION")),
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
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion or override.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`store.dir`").
        field: String,
        /// Error message (e.g., "${`STORE_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise loads
    /// `~/.fetch.yaml` when it exists and falls back to defaults when it
    /// doesn't. Environment overrides are applied after the file, CLI
    /// settings last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// an environment override is malformed, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()?;
        let lookup = |name: &str| std::env::var(name).ok();

        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path, &cwd, lookup)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered, &cwd, lookup)?
        } else {
            let mut config = Self::default_with_base(&cwd);
            config.finish(&cwd, lookup)?;
            config
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Default configuration file location with `~` expanded.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(debug) = settings.debug {
            self.debug = debug;
        }
    }

    /// Return the default config file if it exists.
    fn discover_config() -> Option<PathBuf> {
        let candidate = Self::default_config_path();
        candidate.is_file().then_some(candidate)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            debug: false,
            store: StoreConfigRaw::default(),
            http: HttpConfig::default(),
            store_resolved: StoreConfig {
                dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file<F>(path: &Path, base: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.finish(base, lookup)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse YAML content. An empty document yields defaults.
    fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Expansion, environment overrides, path resolution, then validation.
    fn finish<F>(&mut self, base: &Path, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.expand_env_vars(&lookup)?;
        self.apply_env_overrides(&lookup)?;
        self.resolve_paths(base);
        self.validate()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "http.user_agent cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ref dir) = self.store.dir {
            self.store.dir = Some(expand::expand_env(dir, "store.dir", lookup)?);
        }
        self.http.user_agent = expand::expand_env(&self.http.user_agent, "http.user_agent", lookup)?;
        Ok(())
    }

    /// Apply `FETCH_*` environment variables over file values.
    fn apply_env_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DEBUG) {
            self.debug = parse_bool(&value).ok_or_else(|| ConfigError::EnvVar {
                field: "debug".to_owned(),
                message: format!("{ENV_DEBUG}={value:?} is not a boolean"),
            })?;
        }
        if let Some(value) = lookup(ENV_STORE_DIR) {
            self.store.dir = Some(value);
        }
        if let Some(value) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            let secs = value.trim().parse().map_err(|_| ConfigError::EnvVar {
                field: "http.timeout_secs".to_owned(),
                message: format!("{ENV_HTTP_TIMEOUT_SECS}={value:?} is not a number of seconds"),
            })?;
            self.http.timeout_secs = Some(secs);
        }
        if let Some(value) = lookup(ENV_HTTP_USER_AGENT) {
            self.http.user_agent = value;
        }
        Ok(())
    }

    /// Resolve the store directory against `base`, expanding a leading `~`.
    fn resolve_paths(&mut self, base: &Path) {
        self.store_resolved = StoreConfig {
            dir: match self.store.dir.as_deref() {
                Some(dir) => base.join(shellexpand::tilde(dir).as_ref()),
                None => base.to_path_buf(),
            },
        };
    }
}

/// Parse a boolean environment value.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn no_vars() -> impl Fn(&str) -> Option<String> {
        vars(&[])
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/work"));

        assert!(!config.debug);
        assert_eq!(config.store_resolved.dir, PathBuf::from("/work"));
        assert_eq!(config.http.timeout_secs, None);
        assert_eq!(config.http.timeout(), None);
        assert!(config.http.user_agent.starts_with("fetch/"));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();

        assert!(!config.debug);
        assert!(config.store.dir.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
debug: true
store:
  dir: pages
http:
  timeout_secs: 15
  user_agent: my-agent/1.0
";
        let mut config = Config::parse(yaml).unwrap();
        config.finish(Path::new("/work"), no_vars()).unwrap();

        assert!(config.debug);
        assert_eq!(config.store_resolved.dir, PathBuf::from("/work/pages"));
        assert_eq!(config.http.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.http.user_agent, "my-agent/1.0");
    }

    #[test]
    fn test_parse_absolute_store_dir() {
        let mut config = Config::parse("store:\n  dir: /srv/pages\n").unwrap();
        config.finish(Path::new("/work"), no_vars()).unwrap();

        assert_eq!(config.store_resolved.dir, PathBuf::from("/srv/pages"));
    }

    #[test]
    fn test_store_dir_tilde_is_home_relative() {
        let mut config = Config::parse("store:\n  dir: ~/pages\n").unwrap();
        config.finish(Path::new("/work"), no_vars()).unwrap();

        assert!(config.store_resolved.dir.ends_with("pages"));
        assert!(!config.store_resolved.dir.starts_with("/work"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = Config::parse("debug: [not, a, bool]").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_explicit_missing_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.yaml");

        let err = Config::load(Some(&missing), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(ref p) if p == &missing));
    }

    #[test]
    fn test_load_from_file_records_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fetch.yaml");
        std::fs::write(&path, "debug: true\n").unwrap();

        let config = Config::load_from_file(&path, Path::new("/work"), no_vars()).unwrap();

        assert!(config.debug);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_expand_env_vars_in_file_values() {
        let yaml = "store:\n  dir: ${PAGES_ROOT}/cache\nhttp:\n  user_agent: bot-${BOT_ID}\n";
        let mut config = Config::parse(yaml).unwrap();
        config
            .finish(
                Path::new("/work"),
                vars(&[("PAGES_ROOT", "/srv"), ("BOT_ID", "7")]),
            )
            .unwrap();

        assert_eq!(config.store_resolved.dir, PathBuf::from("/srv/cache"));
        assert_eq!(config.http.user_agent, "bot-7");
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        let mut config = Config::parse("store:\n  dir: ${PAGES_ROOT}\n").unwrap();

        let err = config.finish(Path::new("/work"), no_vars()).unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "store.dir"));
    }

    #[test]
    fn test_env_overrides_replace_file_values() {
        let yaml = "debug: false\nstore:\n  dir: pages\nhttp:\n  timeout_secs: 5\n";
        let mut config = Config::parse(yaml).unwrap();
        config
            .finish(
                Path::new("/work"),
                vars(&[
                    ("FETCH_DEBUG", "true"),
                    ("FETCH_STORE_DIR", "other"),
                    ("FETCH_HTTP_TIMEOUT_SECS", "30"),
                    ("FETCH_HTTP_USER_AGENT", "env-agent"),
                ]),
            )
            .unwrap();

        assert!(config.debug);
        assert_eq!(config.store_resolved.dir, PathBuf::from("/work/other"));
        assert_eq!(config.http.timeout_secs, Some(30));
        assert_eq!(config.http.user_agent, "env-agent");
    }

    #[test]
    fn test_env_override_invalid_bool() {
        let mut config = Config::default_with_base(Path::new("/work"));

        let err = config
            .finish(Path::new("/work"), vars(&[("FETCH_DEBUG", "maybe")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "debug"));
    }

    #[test]
    fn test_env_override_invalid_timeout() {
        let mut config = Config::default_with_base(Path::new("/work"));

        let err = config
            .finish(
                Path::new("/work"),
                vars(&[("FETCH_HTTP_TIMEOUT_SECS", "soon")]),
            )
            .unwrap_err();

        assert!(err.to_string().contains("FETCH_HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_parse_bool_values() {
        for value in ["1", "true", "TRUE", "yes", "on"] {
            assert_eq!(parse_bool(value), Some(true), "{value}");
        }
        for value in ["0", "false", "No", "off"] {
            assert_eq!(parse_bool(value), Some(false), "{value}");
        }
        assert_eq!(parse_bool("2"), None);
    }

    #[test]
    fn test_validate_timeout_zero() {
        let mut config = Config::parse("http:\n  timeout_secs: 0\n").unwrap();

        let err = config.finish(Path::new("/work"), no_vars()).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let mut config = Config::parse("http:\n  user_agent: \"  \"\n").unwrap();

        let err = config.finish(Path::new("/work"), no_vars()).unwrap_err();

        assert!(err.to_string().contains("user_agent"));
    }

    #[test]
    fn test_apply_cli_settings_debug() {
        let mut config = Config::default_with_base(Path::new("/work"));

        config.apply_cli_settings(&CliSettings { debug: Some(true) });

        assert!(config.debug);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::parse("debug: true\n").unwrap();

        config.apply_cli_settings(&CliSettings::default());

        assert!(config.debug);
    }

    #[test]
    fn test_default_config_path_is_dotfile() {
        let path = Config::default_config_path();

        assert_eq!(path.file_name().unwrap(), ".fetch.yaml");
    }
}
