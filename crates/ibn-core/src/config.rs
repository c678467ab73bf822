//! Commissioning tool configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON-RPC endpoint answering `getSetupProtocol`
    pub endpoint: String,
    /// Where protocol documents are saved
    pub download_dir: PathBuf,
    /// First segment of the saved file name
    pub file_name_prefix: String,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Wizard views in display order
    pub views: Vec<String>,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let download_dir = dirs::download_dir().unwrap_or_else(|| data_dir.join("Downloads"));

        Self {
            endpoint: "http://localhost:8084/jsonrpc".to_string(),
            download_dir,
            file_name_prefix: "IBN".to_string(),
            username: None,
            password: None,
            views: vec![
                "pre-installation".to_string(),
                "configuration".to_string(),
                "completion".to_string(),
            ],
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("ibn"))
            .unwrap_or_else(|| PathBuf::from(".ibn"))
    }

    pub fn default_path() -> PathBuf {
        Self::data_dir().join("config.json")
    }

    /// Read a JSON config file; missing keys take their default
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| CoreError::Config(format!("invalid endpoint {}: {}", self.endpoint, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "endpoint must use http or https: {}",
                self.endpoint
            )));
        }

        Ok(url)
    }

    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;

        if self.file_name_prefix.trim().is_empty() {
            return Err(CoreError::Config("file name prefix is empty".to_string()));
        }
        if self.views.is_empty() {
            return Err(CoreError::Config("no wizard views configured".to_string()));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }

    pub fn download_dir() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DOWNLOAD_DIR")
                .ok()
                .map(PathBuf::from)
                .or_else(|| home_dir().map(|h| h.join("Downloads")))
        }
        #[cfg(not(target_os = "linux"))]
        {
            home_dir().map(|h| h.join("Downloads"))
        }
    }

    fn home_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("USERPROFILE").ok().map(PathBuf::from)
        }
        #[cfg(not(target_os = "windows"))]
        {
            std::env::var("HOME").ok().map(PathBuf::from)
        }
    }
}
