//! Terminal configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use timeclock_core::{IdentityHasher, DEFAULT_NONCE_DIGITS};
use tracing::debug;

use crate::error::{Result, TerminalError};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "TIMECLOCK_CONFIG";

/// Terminal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// File holding the terminal's private scalar
    pub key_path: Option<PathBuf>,

    /// Where argument lines are written; stdout when unset
    pub output_path: Option<PathBuf>,

    /// Digits in generated nonces
    pub nonce_digits: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            key_path: Self::default_key_path(),
            output_path: None,
            nonce_digits: DEFAULT_NONCE_DIGITS,
        }
    }
}

impl TerminalConfig {
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("timeclock"))
    }

    fn default_key_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("terminal.key"))
    }

    /// Config file location: `$TIMECLOCK_CONFIG`, else the platform config dir
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        Self::config_dir()
            .map(|dir| dir.join("terminal.json"))
            .ok_or_else(|| TerminalError::Config("no config directory on this platform".into()))
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(?path, "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the pipeline cannot honour
    pub fn validate(&self) -> Result<()> {
        self.hasher().map(|_| ())
    }

    /// Identity hasher configured with this terminal's nonce width
    pub fn hasher(&self) -> Result<IdentityHasher> {
        IdentityHasher::new(self.nonce_digits)
            .map_err(|e| TerminalError::Config(format!("nonce_digits: {}", e)))
    }
}
