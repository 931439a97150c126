// ============================
// axelsub-backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Toml, Yaml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Session lifetime in seconds
    pub session_ttl_secs: u64,
    /// Mark the session cookie `Secure` (set in production, behind HTTPS)
    pub cookie_secure: bool,
    /// Base URL of the Jikan metadata API
    pub jikan_base_url: String,
    /// Create the demo admin account and seeded animes on startup
    pub seed_demo_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().expect("static bind address"),
            log_level: "info".to_string(),
            session_ttl_secs: 60 * 60 * 24 * 30, // 30 days
            cookie_secure: false,
            jikan_base_url: "https://api.jikan.moe/v4".to_string(),
            seed_demo_data: true,
        }
    }
}

impl Settings {
    /// Load settings from the conventional config files merged with
    /// `AXELSUB_`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        let settings = Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Yaml::file("config.yaml"))
            .merge(Json::file("config.json"))
            .merge(Env::prefixed("AXELSUB_"))
            .extract()?;

        Ok(settings)
    }

    /// Load settings from an explicit config file path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("AXELSUB_"))
            .extract()?;

        Ok(settings)
    }

    /// Session lifetime as a `Duration`
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}
