//! Server configuration from environment variables.
//!
//! | variable              | default               |
//! |-----------------------|-----------------------|
//! | `DISEASEDX_BIND`      | `127.0.0.1:8000`      |
//! | `DISEASEDX_DB_PATH`   | unset (document only) |
//! | `DISEASEDX_DATA_PATH` | `data/diseases.json`  |
//! | `DISEASEDX_PAGE_SIZE` | `20`                  |

use diseasedx_core::DEFAULT_PAGE_SIZE;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const BIND_ENV: &str = "DISEASEDX_BIND";
pub const DB_PATH_ENV: &str = "DISEASEDX_DB_PATH";
pub const DATA_PATH_ENV: &str = "DISEASEDX_DATA_PATH";
pub const PAGE_SIZE_ENV: &str = "DISEASEDX_PAGE_SIZE";

const DEFAULT_BIND: &str = "127.0.0.1:8000";
const DEFAULT_DATA_PATH: &str = "data/diseases.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is not a valid socket address: `{value}`")]
    InvalidBind { name: &'static str, value: String },
    #[error("{name} is not a valid page size: `{value}`")]
    InvalidPageSize { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    /// Preferred SQLite source; the document is the fallback.
    pub db_path: Option<PathBuf>,
    pub data_path: PathBuf,
    pub page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            db_path: None,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_raw = get(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.parse().map_err(|_| ConfigError::InvalidBind {
            name: BIND_ENV,
            value: bind_raw.clone(),
        })?;

        let page_size = match get(PAGE_SIZE_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPageSize {
                name: PAGE_SIZE_ENV,
                value: raw.clone(),
            })?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            bind,
            db_path: get(DB_PATH_ENV).map(PathBuf::from),
            data_path: get(DATA_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            page_size,
        })
    }
}
