//! Output sink for argument lines
//!
//! The sink is touched only once the whole line is available. File output
//! goes through a uniquely named temporary sibling and a rename; the
//! temporary is deleted on every error path.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::info;

use crate::error::Result;

/// Destination for a finished argument line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    File(PathBuf),
}

impl OutputSink {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::File(path),
            None => Self::Stdout,
        }
    }

    /// Write `line` followed by a newline
    pub fn write_line(&self, line: &str) -> Result<()> {
        match self {
            Self::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "{}", line)?;
                handle.flush()?;
            }
            Self::File(path) => {
                write_atomic(path, format!("{}\n", line).as_bytes(), LINE_MODE)?;
                info!(?path, "argument line written");
            }
        }
        Ok(())
    }
}

/// Unix mode of argument line files
pub const LINE_MODE: u32 = 0o644;

/// Write `contents` to a temporary file next to `path` created with `mode`,
/// then rename it over `path`
pub fn write_atomic(path: &Path, contents: &[u8], mode: u32) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    builder.prefix(".timeclock-");
    set_mode(&mut builder, mode);

    let mut file = builder.tempfile_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(builder: &mut Builder<'_, '_>, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    builder.permissions(std::fs::Permissions::from_mode(mode));
}

#[cfg(not(unix))]
fn set_mode(_builder: &mut Builder<'_, '_>, _mode: u32) {}
