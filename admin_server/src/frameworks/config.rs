use serde::Deserialize;
use std::{env, fmt, path::PathBuf};

// Runtime settings for the admin service. Values come from an optional TOML
// file (`ADMIN_CONFIG`) and are overridden by environment variables.

const DEFAULT_PORT: u16 = 3002;
const DEFAULT_TERMS_PATH: &str = "data/terms.json";
const DEFAULT_UPLOAD_DIR: &str = "public/resimler/kartlar";
const DEFAULT_IMAGE_PREFIX: &str = "/resimler/kartlar";
const DEFAULT_HOST_SESSION_HOURS: u64 = 6;

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub terms_path: Option<PathBuf>,
    pub upload_dir: Option<PathBuf>,
    pub public_image_prefix: Option<String>,
    pub host_pin: Option<String>,
    pub host_session_hours: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub http_port: u16,
    pub terms_path: PathBuf,
    pub upload_dir: PathBuf,
    pub public_image_prefix: String,
    pub host_pin: Option<String>,
    pub host_session_hours: u64,
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: String, source: std::io::Error },
    Parse { path: String, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => write!(f, "failed to read {path}: {source}"),
            ConfigError::Parse { path, source } => write!(f, "failed to parse {path}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AdminConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let file = match env::var("ADMIN_CONFIG") {
            Ok(path) => read_file_config(&path)?,
            Err(_) => FileConfig::default(),
        };
        Ok(Self::resolve(file, |key| env::var(key).ok()))
    }

    fn resolve(file: FileConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let http_port = lookup("ADMIN_SERVER_PORT")
            .and_then(|v| v.parse().ok())
            .or(file.port)
            .unwrap_or(DEFAULT_PORT);
        let terms_path = lookup("TERMS_PATH")
            .map(PathBuf::from)
            .or(file.terms_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TERMS_PATH));
        let upload_dir = lookup("UPLOAD_DIR")
            .map(PathBuf::from)
            .or(file.upload_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR));
        let public_image_prefix = file
            .public_image_prefix
            .unwrap_or_else(|| DEFAULT_IMAGE_PREFIX.to_string());
        let host_pin = lookup("HOST_PIN")
            .or(file.host_pin)
            .filter(|pin| !pin.trim().is_empty());
        let host_session_hours = lookup("HOST_SESSION_HOURS")
            .and_then(|v| v.parse().ok())
            .or(file.host_session_hours)
            .unwrap_or(DEFAULT_HOST_SESSION_HOURS);

        Self {
            http_port,
            terms_path,
            upload_dir,
            public_image_prefix,
            host_pin,
            host_session_hours,
        }
    }

    pub fn host_session_ttl_seconds(&self) -> u64 {
        self.host_session_hours * 60 * 60
    }
}

fn read_file_config(path: &str) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}
