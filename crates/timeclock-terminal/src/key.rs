//! Signing key provisioning
//!
//! A key file holds one scalar, decimal or `0x` hex, optionally followed by
//! a newline. Generated keys are written as 64 hex digits.

use rand::rngs::OsRng;
use std::path::{Path, PathBuf};
use timeclock_core::{parse_private_key, PrivateKey, Signer};
use tracing::info;
use zeroize::Zeroizing;

use crate::config::TerminalConfig;
use crate::error::{Result, TerminalError};
use crate::sink::write_atomic;

/// Environment variable consulted when no key is named explicitly
pub const KEY_ENV: &str = "TIMECLOCK_KEY";

/// Where the terminal's private scalar comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    File(PathBuf),
    Env(String),
    /// Well-known debug scalar; anyone can forge signatures with it
    #[cfg(feature = "debug-key")]
    Debug,
}

impl KeySource {
    /// Pick a source: `--debug-key`, then `--key-file`, then `--key-env`,
    /// then `$TIMECLOCK_KEY` if set, then the configured key file.
    pub fn resolve(
        key_file: Option<PathBuf>,
        key_env: Option<String>,
        debug_key: bool,
        config: &TerminalConfig,
    ) -> Result<Self> {
        if debug_key {
            #[cfg(feature = "debug-key")]
            return Ok(Self::Debug);
            #[cfg(not(feature = "debug-key"))]
            return Err(TerminalError::Key(
                "this build has no debug key; rebuild with --features debug-key".into(),
            ));
        }
        if let Some(path) = key_file {
            return Ok(Self::File(path));
        }
        if let Some(var) = key_env {
            return Ok(Self::Env(var));
        }
        if std::env::var_os(KEY_ENV).is_some() {
            return Ok(Self::Env(KEY_ENV.to_string()));
        }
        config
            .key_path
            .clone()
            .map(Self::File)
            .ok_or_else(|| TerminalError::Key("no signing key configured".into()))
    }

    pub fn load(&self) -> Result<PrivateKey> {
        let key = match self {
            Self::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    TerminalError::Key(format!("cannot read key file {}: {}", path.display(), e))
                })?;
                parse_private_key(&text)?
            }
            Self::Env(var) => {
                let text = std::env::var(var)
                    .map_err(|_| TerminalError::Key(format!("{} is not set", var)))?;
                parse_private_key(&text)?
            }
            #[cfg(feature = "debug-key")]
            Self::Debug => {
                tracing::warn!("signing with the well-known debug key");
                parse_private_key(timeclock_core::DEBUG_PRIVATE_KEY)?
            }
        };
        Ok(key)
    }

    pub fn signer(&self) -> Result<Signer> {
        Ok(Signer::new(self.load()?))
    }
}

/// Unix mode of key files; the file is created with it, before any secret
/// byte is written
pub const KEY_MODE: u32 = 0o600;

/// Generate a fresh private scalar and write it to `path` as `0x` hex
pub fn generate_key_file(path: &Path) -> Result<PrivateKey> {
    if path.exists() {
        return Err(TerminalError::Key(format!(
            "refusing to overwrite existing key file {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let key = PrivateKey::random(&mut OsRng);

    let mut digits = Zeroizing::new([0u8; 64]);
    hex::encode_to_slice(&*key.to_bytes_be(), &mut *digits)
        .map_err(|e| TerminalError::Key(format!("cannot encode key: {}", e)))?;
    let mut contents = Zeroizing::new(Vec::with_capacity(67));
    contents.extend_from_slice(b"0x");
    contents.extend_from_slice(&*digits);
    contents.push(b'\n');

    write_atomic(path, &contents, KEY_MODE)?;

    info!(?path, "generated terminal signing key");
    Ok(key)
}
