//! Server Configuration
//!
//! Defaults, overridden by an optional TOML file, overridden by CLI flags
//! (each flag also reads a `TODO_*` environment variable).

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::repository::DATABASE_FILE;

/// Where items are kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Process memory, lost on exit
    #[default]
    Memory,
    /// SQLite file in the persist directory
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address; port 0 picks a free port
    pub bind: SocketAddr,
    pub storage: StorageKind,
    /// Writable directory for the database
    pub persist_dir: Option<PathBuf>,
    /// Built UI (`trunk build` output)
    pub static_dir: PathBuf,
    /// Seed the memory store with sample items
    pub sample_data: bool,
    /// Also log to a rotated file here
    pub log_dir: Option<PathBuf>,
    pub shutdown_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            storage: StorageKind::Memory,
            persist_dir: None,
            static_dir: PathBuf::from("dist"),
            sample_data: true,
            log_dir: None,
            shutdown_timeout_ms: 100,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ServerError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ServerError> {
        let text = std::fs::read_to_string(path).map_err(|source| ServerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ServerError> {
        if self.storage == StorageKind::Sqlite && self.persist_dir.is_none() {
            return Err(ServerError::InvalidConfig(
                "sqlite storage needs a persist_dir".to_string(),
            ));
        }
        Ok(())
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// Database file, when a persist dir is configured
    pub fn database_path(&self) -> Option<PathBuf> {
        self.persist_dir.as_ref().map(|dir| dir.join(DATABASE_FILE))
    }
}

/// Command line flags
#[derive(Debug, Default, Parser)]
#[command(name = "todo-server", about = "Serves the todo app and its /items API")]
pub struct CliArgs {
    /// TOML config file
    #[arg(long, env = "TODO_CONFIG")]
    pub config: Option<PathBuf>,
    /// Listen address, e.g. 127.0.0.1:8080
    #[arg(long, env = "TODO_BIND")]
    pub bind: Option<SocketAddr>,
    #[arg(long, value_enum, env = "TODO_STORAGE")]
    pub storage: Option<StorageKind>,
    #[arg(long, env = "TODO_PERSIST_DIR")]
    pub persist_dir: Option<PathBuf>,
    #[arg(long, env = "TODO_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
    #[arg(long, env = "TODO_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
    /// Start with an empty memory store
    #[arg(long)]
    pub no_sample_data: bool,
}

impl CliArgs {
    /// Config file (if any) with these flags applied on top, validated
    pub fn resolve(self) -> Result<ServerConfig, ServerError> {
        let base = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(storage) = self.storage {
            config.storage = storage;
        }
        if self.persist_dir.is_some() {
            config.persist_dir = self.persist_dir;
        }
        if let Some(static_dir) = self.static_dir {
            config.static_dir = static_dir;
        }
        if self.log_dir.is_some() {
            config.log_dir = self.log_dir;
        }
        if self.no_sample_data {
            config.sample_data = false;
        }
        config
    }
}
