use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable holding the form-signing secret.
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("cafe-data.csv")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_csrf_time_limit")]
    pub csrf_time_limit_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            csrf_time_limit_secs: default_csrf_time_limit(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}
fn default_csrf_time_limit() -> u64 {
    3600
}

/// Secret used to sign form tokens. Never logged.
#[derive(Clone)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            bail!("{} must not be empty", SECRET_KEY_VAR);
        }
        Ok(Self(secret))
    }

    /// Read the secret from `SECRET_KEY`. A missing or empty value is an
    /// error; there is no fallback secret.
    pub fn from_env() -> Result<Self> {
        let value = std::env::var(SECRET_KEY_VAR)
            .with_context(|| format!("{} must be set to start the server", SECRET_KEY_VAR))?;
        Self::new(value)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;

    Ok(config)
}

/// Like [`load_config`], but falls back to defaults when `path` does not
/// exist. A file that exists but fails to parse is still an error.
pub fn load_config_or_default(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file {} not found, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }
    load_config(path)
}

fn validate(config: &Config) -> Result<()> {
    if config.store.path.as_os_str().is_empty() {
        bail!("store.path must not be empty");
    }

    if config.server.bind.trim().is_empty() {
        bail!("server.bind must not be empty");
    }

    if config.server.csrf_time_limit_secs == 0 {
        bail!("server.csrf_time_limit_secs must be > 0");
    }

    Ok(())
}
