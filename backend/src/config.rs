//! Server configuration read from the environment.
//!
//! | Variable              | Default     | Meaning                                        |
//! |-----------------------|-------------|------------------------------------------------|
//! | `WIDGETS_HOST`        | `127.0.0.1` | Address the HTTP server binds to.              |
//! | `WIDGETS_PORT`        | `8080`      | Port the HTTP server binds to.                 |
//! | `WIDGETS_UPLOAD_DIR`  | `uploads`   | Upload directory name under `/images`.         |
//! | `WIDGETS_SCRIPT_NAME` | (empty)     | Prefix of every generated route URL.           |
//! | `WIDGETS_MESSAGES`    | (none)      | JSON file of `key: message` translations.      |

use crate::widget::context::{Catalogue, RouteUrlBuilder, StaticConfig, WidgetContext, UPLOAD_DIR_NAME};
use log::{info, warn};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port '{0}': {1}")]
    InvalidPort(String, #[source] ParseIntError),

    #[error("Cannot read message catalogue {path:?}: {source}")]
    CatalogueIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid message catalogue {path:?}: {source}")]
    CatalogueJson {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub upload_dir_name: String,
    pub script_name: String,
    pub messages_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            upload_dir_name: "uploads".to_string(),
            script_name: String::new(),
            messages_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable source; unset variables keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("WIDGETS_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidPort(raw.clone(), e))?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("WIDGETS_HOST").unwrap_or(defaults.host),
            port,
            upload_dir_name: lookup("WIDGETS_UPLOAD_DIR").unwrap_or(defaults.upload_dir_name),
            script_name: lookup("WIDGETS_SCRIPT_NAME").unwrap_or(defaults.script_name),
            messages_path: lookup("WIDGETS_MESSAGES").map(PathBuf::from),
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Builds the collaborators shared by every widget the server renders.
    pub fn widget_context(&self) -> Result<WidgetContext, ConfigError> {
        let catalogue = match &self.messages_path {
            Some(path) => load_catalogue(path)?,
            None => Catalogue::new(),
        };

        Ok(WidgetContext::new(
            catalogue,
            RouteUrlBuilder::new(self.script_name.clone()),
            StaticConfig::new().with(UPLOAD_DIR_NAME, self.upload_dir_name.clone()),
        ))
    }
}

fn load_catalogue(path: &Path) -> Result<Catalogue, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogueIo {
        path: path.to_path_buf(),
        source,
    })?;
    let catalogue = Catalogue::from_json_str(&json).map_err(|source| ConfigError::CatalogueJson {
        path: path.to_path_buf(),
        source,
    })?;
    if catalogue.is_empty() {
        warn!("Message catalogue {:?} is empty, messages stay untranslated", path);
    } else {
        info!("Loaded {} messages from {:?}", catalogue.len(), path);
    }
    Ok(catalogue)
}
