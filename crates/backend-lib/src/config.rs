// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use crate::auth::password::PasswordRequirements;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Token signing secret, loaded once at startup. Must be overridden
    /// outside of local development (`MENTORETALK_JWT_SECRET`).
    pub jwt_secret: String,
    /// Token lifetime in seconds. Fixed short horizon, no refresh path.
    pub token_ttl_secs: u64,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".parse().unwrap(),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            jwt_secret: "dev-secret-change-me".to_string(),
            token_ttl_secs: 60 * 60, // 1 hour
            password_requirements: PasswordRequirements::default(),
        }
    }
}

impl Settings {
    /// Load settings: defaults, then `config.toml`, then `MENTORETALK_*` env vars.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load settings with an explicit config file path.
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("MENTORETALK_"))
            .extract()?;
        Ok(settings)
    }
}
