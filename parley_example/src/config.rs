use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub mongodb: MongoDbConfig,
    pub logging: LoggingConfig,

    // Secret (from ENV only, and only for the mongodb backend)
    #[serde(default)]
    pub mongodb_uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    Mongodb,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: Backend,
    #[serde(default = "default_load_on_startup")]
    pub load_on_startup: bool,
}

fn default_load_on_startup() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LoggingConfig {
    /// `RUST_LOG` wins over the configured level; an unparsable level falls back to `info`
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables, e.g. PARLEY_STORE__BACKEND=mongodb
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("PARLEY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        if cfg.store.backend == Backend::Mongodb {
            cfg.mongodb_uri = std::env::var("MONGODB_URI")
                .map_err(|_| ConfigError::Message("MONGODB_URI environment variable is required".to_string()))?;
        }

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }
}
