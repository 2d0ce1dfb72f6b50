use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RfcToolsError};

/// Name of the configuration file.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "rfc-tools";

/// Operator settings for the server process.
///
/// Endpoints, timeouts and truncation caps are fixed and not part of this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// `User-Agent` sent with every outbound request.
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            user_agent: format!("rfc-tools/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Returns the default configuration path, `<config_dir>/rfc-tools/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
}

/// Loads the configuration from `path`.
///
/// A missing file yields the default configuration.
pub fn load_config(path: &Path) -> Result<ServerConfig> {
    if !path.exists() {
        return Ok(ServerConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| RfcToolsError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    serde_json::from_str(&contents).map_err(|e| RfcToolsError::Config {
        message: format!("failed to parse config file '{}': {}", path.display(), e),
    })
}

/// Writes the default configuration to `path`.
///
/// An existing file is left untouched unless `force` is set. Returns `true`
/// when a file was written.
pub fn init_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    save_config(path, &ServerConfig::default())?;
    Ok(true)
}

/// Saves `config` as pretty JSON, replacing `path` in a single rename so a
/// reader never sees a half-written file.
pub fn save_config(path: &Path, config: &ServerConfig) -> Result<()> {
    let config_error = |action: &str, target: &Path, e: std::io::Error| RfcToolsError::Config {
        message: format!("cannot {} '{}': {}", action, target.display(), e),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| config_error("create directory", parent, e))?;
    }

    let staged = path.with_extension("tmp");
    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');
    fs::write(&staged, json).map_err(|e| config_error("write", &staged, e))?;
    fs::rename(&staged, path).map_err(|e| config_error("replace", path, e))
}
