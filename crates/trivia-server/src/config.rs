//! Server configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional file
//! (`$TRIVIA_CONFIG`, or `trivia.{toml,yaml,json}` in the working directory),
//! then `TRIVIA_*` environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "TRIVIA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub storage: StorageKind,
    pub data_dir: PathBuf,
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
    pub store_timeout_secs: u64,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        let file = std::env::var("TRIVIA_CONFIG").ok().map(PathBuf::from);
        Self::from_sources(file.as_deref(), ENV_PREFIX)
    }

    fn from_sources(file: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("bind_address", "0.0.0.0:5000")?
            .set_default("storage", "sqlite")?
            .set_default("data_dir", "./data")?
            .set_default("store_timeout_secs", 5)?;

        builder = match file {
            Some(path) => {
                tracing::info!("Reading configuration file: {}", path.display());
                builder.add_source(config::File::from(path))
            }
            None => builder.add_source(config::File::with_name("trivia").required(false)),
        };

        builder
            .add_source(config::Environment::with_prefix(env_prefix))
            .build()
            .context("Failed to assemble configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("trivia.db"))
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}
