//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT};
use crate::error::AppError;
use crate::types::StorageBackend;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub menu: MenuSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub storage: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuSettings {
    /// Refuse a second root menu inside the same module.
    pub single_root_per_module: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Builder seeded with every default, before files and environment are layered on.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", DEFAULT_HOST)?
            .set_default("app.port", DEFAULT_PORT)?
            .set_default("app.name", "navmenu-server")?
            .set_default("app.storage", StorageBackend::Postgres.as_str())?
            .set_default("database.url", "")?
            .set_default("database.max_connections", DEFAULT_MAX_CONNECTIONS)?
            .set_default("database.min_connections", 1)?
            .set_default("menu.single_root_per_module", false)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.app.storage == StorageBackend::Postgres && self.database.url.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "database.url is required when app.storage is postgres".into(),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::InvalidConfig(
                "database.min_connections cannot exceed database.max_connections".into(),
            ));
        }
        Ok(())
    }
}
