//! Configuration loading for vdocs.
//!
//! The config file is TOML. String values may reference environment
//! variables as `${VAR}` or `${VAR:-default}`; variables can come from the
//! process environment or from a `.env` file loaded beforehand.

use std::env;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::truncate::{DEFAULT_BASE64_CHAR_LIMIT, DEFAULT_LINE_LIMIT, TruncationPolicy};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "VDOCS_CONFIG";

/// Environment variable naming an explicit `.env` file.
pub const ENV_FILE_VAR: &str = "ENV_FILE";

/// Errors for configuration problems the user has to fix.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("No vector databases configured")]
    NoDatabases,

    #[error("Database '{0}' not found in configuration")]
    DatabaseNotFound(String),

    #[error("Failed to load env file {path}: {message}")]
    EnvFile { path: PathBuf, message: String },
}

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub databases: DatabasesConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Configured databases and which one is used by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabasesConfig {
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub vector_databases: Vec<DatabaseConfig>,
}

/// Supported store types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    /// Directory of JSON collection files.
    Local,
    /// Process-local store, empty on every start.
    Memory,
}

impl std::fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// One configured database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DatabaseKind,
    /// Data directory for `local` databases.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Collections created empty for `memory` databases.
    #[serde(default)]
    pub collections: Vec<String>,
}

/// Display defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_short_lines")]
    pub short_lines: usize,
    #[serde(default = "default_base64_chars")]
    pub base64_chars: usize,
    #[serde(default)]
    pub no_truncate: bool,
}

fn default_short_lines() -> usize {
    DEFAULT_LINE_LIMIT
}

fn default_base64_chars() -> usize {
    DEFAULT_BASE64_CHAR_LIMIT
}

fn default_data_path() -> String {
    ProjectDirs::from("", "", "vdocs").map_or_else(
        || "./.vdocs".to_string(),
        |dirs| dirs.data_dir().display().to_string(),
    )
}

impl Default for DatabasesConfig {
    fn default() -> Self {
        Self {
            default: Some("local".to_string()),
            vector_databases: vec![DatabaseConfig {
                name: "local".to_string(),
                kind: DatabaseKind::Local,
                path: Some(default_data_path()),
                url: None,
                api_key: None,
                collections: vec![],
            }],
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            short_lines: default_short_lines(),
            base64_chars: default_base64_chars(),
            no_truncate: false,
        }
    }
}

impl Config {
    /// Load config from an explicit path, `$VDOCS_CONFIG`, or
    /// ~/.config/vdocs/config.toml, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested file is missing, or if the
    /// file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        if let Some(path) = requested {
            if !path.exists() {
                return Err(ConfigError::NotFound(path).into());
            }
            return Self::load_from(&path);
        }

        if let Some(path) = Self::config_path()
            && path.exists()
        {
            return Self::load_from(&path);
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Config::default())
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        tracing::debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse config text, interpolating environment references in strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or does not match the
    /// config schema.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let mut raw = toml::Value::Table(toml::from_str::<toml::Table>(contents)?);
        interpolate_value(&mut raw, &|name| env::var(name).ok());
        let config: Self = raw.try_into()?;
        Ok(config)
    }

    /// Default config file location under the platform config dir.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "vdocs").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// The database to use: `name` if given, else the configured default,
    /// else the first one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoDatabases` if none are configured, or
    /// `ConfigError::DatabaseNotFound` if `name` does not exist.
    pub fn database(&self, name: Option<&str>) -> Result<&DatabaseConfig, ConfigError> {
        let databases = &self.databases.vector_databases;
        let first = databases.first().ok_or(ConfigError::NoDatabases)?;

        if let Some(name) = name {
            return databases
                .iter()
                .find(|db| db.name == name)
                .ok_or_else(|| ConfigError::DatabaseNotFound(name.to_string()));
        }

        Ok(self
            .databases
            .default
            .as_deref()
            .and_then(|default| databases.iter().find(|db| db.name == default))
            .unwrap_or(first))
    }

    /// Names of all configured databases, in file order.
    #[must_use]
    pub fn database_names(&self) -> Vec<&str> {
        self.databases
            .vector_databases
            .iter()
            .map(|db| db.name.as_str())
            .collect()
    }

    /// Truncation policy from display settings and command-line overrides.
    #[must_use]
    pub fn truncation_policy(&self, no_truncate: bool, short_lines: Option<usize>) -> TruncationPolicy {
        TruncationPolicy {
            disabled: no_truncate || self.display.no_truncate,
            line_limit: short_lines.unwrap_or(self.display.short_lines),
            base64_char_limit: self.display.base64_chars,
        }
    }
}

impl DatabaseConfig {
    /// Data directory with `~` expanded.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        expand_tilde(self.path.as_deref().unwrap_or("./.vdocs"))
    }

    /// API key with all but the last four characters hidden.
    #[must_use]
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_secret)
    }
}

fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}

/// Load a `.env` file: the explicit path, `$ENV_FILE`, or `./.env` if present.
///
/// # Errors
///
/// Returns `ConfigError::EnvFile` if an explicitly requested file cannot be
/// loaded. A missing `./.env` is not an error.
pub fn load_env_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    let requested = explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(ENV_FILE_VAR).map(PathBuf::from));

    let Some(path) = requested else {
        return Ok(dotenvy::dotenv().ok());
    };

    match dotenvy::from_path(&path) {
        Ok(()) => Ok(Some(path)),
        Err(e) => Err(ConfigError::EnvFile {
            path,
            message: e.to_string(),
        }),
    }
}

/// Expand `${VAR}` and `${VAR:-default}` references in every string.
fn interpolate_value(value: &mut toml::Value, lookup: &dyn Fn(&str) -> Option<String>) {
    match value {
        toml::Value::String(s) => *s = interpolate(s, lookup),
        toml::Value::Array(items) => {
            for item in items {
                interpolate_value(item, lookup);
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                interpolate_value(item, lookup);
            }
        }
        _ => {}
    }
}

/// Expand environment references in a single string.
///
/// Unset and empty variables both take the default (or become empty). An
/// unterminated `${` is left as written.
pub fn interpolate(input: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };

        out.push_str(&rest[..start]);
        let expr = &rest[start + 2..start + 2 + len];
        let (name, default) = expr.split_once(":-").unwrap_or((expr, ""));

        let value = lookup(name)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string());
        out.push_str(&value);

        rest = &rest[start + 2 + len + 1..];
    }

    out.push_str(rest);
    out
}

/// Expand ~ to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(base_dirs) = BaseDirs::new()
    {
        return base_dirs.home_dir().join(stripped);
    }
    PathBuf::from(path)
}
