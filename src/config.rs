use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::credentials::ClientOptions;
use crate::transport::WireFormat;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub const ENV_USERNAME: &str = "GEOTAB_USERNAME";
pub const ENV_PASSWORD: &str = "GEOTAB_PASSWORD";
pub const ENV_API_KEY: &str = "GEOTAB_API_KEY";
pub const ENV_SESSION_ID: &str = "GEOTAB_SESSION_ID";
pub const ENV_URI: &str = "GEOTAB_SANDBOX_URL";
pub const ENV_WIRE_FORMAT: &str = "GEOTAB_WIRE_FORMAT";

/// Top-level layout of `config.toml`:
///
/// ```toml
/// [myadmin]
/// username = "user@example.com"
/// password = "secret"
/// uri = "https://myadminapitest.geotab.com/v2/MyAdminApi.ashx"
/// wire_format = "json"
/// timeout_secs = 30
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    pub myadmin: MyAdminConfig,
}

#[derive(Debug, Deserialize)]
pub struct MyAdminConfig {
    #[serde(flatten)]
    pub options: ClientOptions,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load `config.toml` from the working directory.
    pub fn new() -> Result<Self> {
        Self::from_path(DEFAULT_CONFIG_PATH)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_toml_str(&config_str)?;
        info!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        toml::from_str(config_str).context("parsing MyAdmin config")
    }

    /// Build a config from the process environment, reading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let wire_format = match lookup(ENV_WIRE_FORMAT) {
            Some(value) => value
                .parse::<WireFormat>()
                .with_context(|| format!("invalid {ENV_WIRE_FORMAT}"))?,
            None => WireFormat::default(),
        };

        Ok(Self {
            myadmin: MyAdminConfig {
                options: ClientOptions {
                    username: lookup(ENV_USERNAME),
                    password: lookup(ENV_PASSWORD),
                    api_key: lookup(ENV_API_KEY),
                    session_id: lookup(ENV_SESSION_ID),
                    uri: lookup(ENV_URI),
                    wire_format,
                },
                timeout_secs: None,
            },
        })
    }

    pub fn client_options(&self) -> ClientOptions {
        self.myadmin.options.clone()
    }
}
