use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use crate::weather::client::{points_url, DEFAULT_BASE_URL};

/// Frame server configuration, loaded from TOML.
/// Every field has a default so an empty file (or no file) is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server_config: ServerConfig,
    #[serde(default)]
    pub catalog_config: CatalogConfig,
    #[serde(default)]
    pub slideshow_config: SlideshowConfig,
    #[serde(default)]
    pub weather_config: WeatherConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    // listen address: eg: 0.0.0.0:8010
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    // directory served under /static/
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    // directory holding index.html
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8010".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("/app/test2/")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            static_dir: default_static_dir(),
            templates_dir: default_templates_dir(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    // sqlite database with the `images` table
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("/app/DB/imagesDB")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlideshowConfig {
    // seconds between image changes
    #[serde(default = "default_slide_interval")]
    pub interval_secs: u64,
}

fn default_slide_interval() -> u64 {
    60
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_slide_interval(),
        }
    }
}

impl SlideshowConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_enabled")]
    pub enabled: bool,

    // forecast service root, the points endpoint is derived from it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    // seconds between refreshes
    #[serde(default = "default_weather_interval")]
    pub interval_secs: u64,

    // per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // NOAA rejects requests without a user agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_weather_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_latitude() -> f64 {
    47.4502
}

fn default_longitude() -> f64 {
    -122.8276
}

fn default_weather_interval() -> u64 {
    15 * 60
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("pictureframe/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: default_weather_enabled(),
            base_url: default_base_url(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            interval_secs: default_weather_interval(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl WeatherConfig {
    pub fn points_url(&self) -> String {
        points_url(&self.base_url, self.latitude, self.longitude)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

pub fn load(path: &str) -> anyhow::Result<Config> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    let config: Config = toml::from_str(&content).with_context(|| format!("failed to parse {}", path))?;
    Ok(config)
}
