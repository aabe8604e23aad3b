//! Configuration management for formauth.
//!
//! Loads configuration from ${FORMAUTH_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Env var overriding `auth.token_url`.
pub const TOKEN_URL_ENV: &str = "FORMAUTH_TOKEN_URL";
/// Env var overriding `auth.profile_url`.
pub const PROFILE_URL_ENV: &str = "FORMAUTH_PROFILE_URL";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, run `cargo xtask update-default-config`.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for formauth configuration and data directories.
    //!
    //! FORMAUTH_HOME resolution order:
    //! 1. FORMAUTH_HOME environment variable (if set)
    //! 2. ~/.config/formauth (default)

    use std::path::PathBuf;

    /// Returns the formauth home directory.
    pub fn formauth_home() -> PathBuf {
        if let Ok(home) = std::env::var("FORMAUTH_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("formauth"))
            .unwrap_or_else(|| PathBuf::from(".formauth"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        formauth_home().join("config.toml")
    }

    /// Returns the default directory for TUI log files.
    pub fn logs_dir() -> PathBuf {
        formauth_home().join("logs")
    }
}

/// Identity provider endpoints and client registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Password-grant token endpoint
    pub token_url: String,
    /// Profile lookup endpoint
    pub profile_url: String,
    /// Registered client id sent with the token request
    pub client_id: String,
    /// Connection (user database) name
    pub connection: String,
    /// Space-separated scopes
    pub scope: String,
    /// Per-request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,
}

impl AuthConfig {
    const DEFAULT_TOKEN_URL: &str = "https://pannuaj.auth0.com/oauth/ro";
    const DEFAULT_PROFILE_URL: &str = "https://reviewgen.auth0.com/tokeninfo";
    const DEFAULT_CLIENT_ID: &str = "TV7BKNxhUHBioMz6CF4s7k2i9cbcSZ1k";
    const DEFAULT_CONNECTION: &str = "Username-Password-Authentication";
    const DEFAULT_SCOPE: &str = "openid name email";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;

    /// Returns the request timeout, or None if disabled (0).
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Applies endpoint overrides from the environment.
    ///
    /// Empty or whitespace-only values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = env_override(TOKEN_URL_ENV) {
            self.token_url = url;
        }
        if let Some(url) = env_override(PROFILE_URL_ENV) {
            self.profile_url = url;
        }
    }
}

fn env_override(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_url: Self::DEFAULT_TOKEN_URL.to_string(),
            profile_url: Self::DEFAULT_PROFILE_URL.to_string(),
            client_id: Self::DEFAULT_CLIENT_ID.to_string(),
            connection: Self::DEFAULT_CONNECTION.to_string(),
            scope: Self::DEFAULT_SCOPE.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Session store location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store file, relative to FORMAUTH_HOME unless absolute
    pub file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file: "storage.json".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when FORMAUTH_LOG is unset
    pub level: String,
    /// Directory for TUI log files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration from the default config path, then applies
    /// environment overrides.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.auth.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the session store file against FORMAUTH_HOME.
    pub fn storage_path(&self) -> PathBuf {
        let file = PathBuf::from(&self.storage.file);
        if file.is_absolute() {
            file
        } else {
            paths::formauth_home().join(file)
        }
    }

    /// Resolves the TUI log directory.
    pub fn logs_dir(&self) -> PathBuf {
        self.logging
            .dir
            .as_ref()
            .map_or_else(paths::logs_dir, PathBuf::from)
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Uses the embedded template for structure/comments and merges
    /// generated values from `Config::default()` into it.
    ///
    /// # Errors
    /// Returns an error if serialization or template parsing fails.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
