use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;

static DATA_DIR_NAME: &str = "yatube";
static DB_NAME: &str = "yatube_db.sqlite";
static MEDIA_DIR_NAME: &str = "media";
static CONFIG_FILE_NAME: &str = "config.json";

/// Overrides the platform data directory.
pub static DATA_DIR_ENV: &str = "YATUBE_DATA_DIR";

// data_dir_path
// |- yatube
//    |- yatube_db.sqlite
//    |- media/
//    |- config.json

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to find a data directory on this platform")]
    NoDataDir,
    #[error("config io error")]
    Io(#[from] std::io::Error),
    #[error("malformed config file")]
    Json(#[from] serde_json::Error),
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_identity_header() -> String {
    "x-remote-user".to_string()
}

fn default_login_url() -> String {
    "/auth/login/".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct YatubeConfig {
    pub database_path: PathBuf,

    /// Root for uploaded post images, served under `/media/`.
    pub media_dir: PathBuf,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Request header the upstream identity proxy fills with the
    /// authenticated username.
    #[serde(default = "default_identity_header")]
    pub identity_header: String,

    /// Where anonymous visitors are sent when they hit a mutating route.
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

impl YatubeConfig {
    /// Config with every file rooted under `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        YatubeConfig {
            database_path: data_dir.join(DB_NAME),
            media_dir: data_dir.join(MEDIA_DIR_NAME),
            bind_addr: default_bind_addr(),
            identity_header: default_identity_header(),
            login_url: default_login_url(),
        }
    }
}

fn data_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .ok_or(ConfigError::NoDataDir)
}

/// Gets the existing config or initializes a new one if it doesn't exist
pub async fn get_or_init() -> Result<YatubeConfig, ConfigError> {
    let yatube_dir = data_dir()?;
    load_or_init_in(&yatube_dir).await
}

pub async fn load_or_init_in(yatube_dir: &Path) -> Result<YatubeConfig, ConfigError> {
    let config_path = yatube_dir.join(CONFIG_FILE_NAME);

    fs::create_dir_all(yatube_dir).await?;

    if fs::try_exists(&config_path).await? {
        let mut file = fs::File::open(&config_path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        let config: YatubeConfig = serde_json::from_str(&contents)?;
        Ok(config)
    } else {
        let config = YatubeConfig::new(yatube_dir);

        let json = serde_json::to_string_pretty(&config)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(json.as_bytes()).await?;
        info!(path = %config_path.display(), "wrote default config");

        Ok(config)
    }
}
