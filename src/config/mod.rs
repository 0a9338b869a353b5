//! Configuration management

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_AUTH_URL: &str = "https://apiloginregistro-1.onrender.com";
pub const DEFAULT_CATALOG_URL: &str = "https://apiadministrador.onrender.com";
pub const DEFAULT_LOG_FILTER: &str = "bazar_client=debug";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the authentication service
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Base URL of the catalog service (products, categories, images)
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// Used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            catalog_url: default_catalog_url(),
            log_filter: default_log_filter(),
        }
    }
}

/// Get config directory (BAZAR_CONFIG_DIR, XDG_CONFIG_HOME or platform default)
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BAZAR_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/bazar-client");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("bazar-client");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config/bazar-client");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("bazar-client");
        }
    }

    // Fallback to current directory
    PathBuf::from(".")
}

pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir();

    let mut builder = ::config::Config::builder()
        .set_default("auth_url", DEFAULT_AUTH_URL)?
        .set_default("catalog_url", DEFAULT_CATALOG_URL)?
        .set_default("log_filter", DEFAULT_LOG_FILTER)?
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        // BAZAR_AUTH_URL, BAZAR_CATALOG_URL, BAZAR_LOG_FILTER
        .add_source(
            ::config::Environment::with_prefix("BAZAR")
                .prefix_separator("_")
                .separator("__"),
        );

    // Precedence: BAZAR_* > legacy *_API_URL > config file > default
    if std::env::var("BAZAR_AUTH_URL").is_err() {
        if let Ok(url) = std::env::var("AUTH_API_URL") {
            builder = builder.set_override("auth_url", url)?;
        }
    }
    if std::env::var("BAZAR_CATALOG_URL").is_err() {
        if let Ok(url) = std::env::var("CATALOG_API_URL") {
            builder = builder.set_override("catalog_url", url)?;
        }
    }

    let config = builder.build()?;

    Ok(config.try_deserialize()?)
}
