//! # Filesystem Primitives
//!
//! Thin wrappers around `std::fs` for the few operations the tasks need:
//! backing a file up before removal, idempotently appending a line to a hook
//! script, and writing pretty JSON.
//!
//! These carry no policy. Which files get backed up or which lines a hook
//! receives is decided by the tasks.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::error::{Error, Result};

/// Copy `path` to a sibling `<name>.bak` file and return the backup path.
///
/// If a plain `.bak` already exists from an earlier run it is left alone and
/// the new backup gets a millisecond-timestamp suffix instead.
pub fn backup_file(path: &Path) -> Result<PathBuf> {
    let display_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    let mut backup = parent.join(format!("{display_name}.bak"));
    if backup.exists() {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        backup = parent.join(format!("{display_name}-{millis}.bak"));
    }

    fs::copy(path, &backup).map_err(|e| Error::Backup {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    log::debug!("backed up {} -> {}", path.display(), backup.display());
    Ok(backup)
}

/// Ensure `line` is present in the script file at `path`.
///
/// Creates the file (and parent directories) when missing, appends when the
/// line is absent, and leaves the file untouched when an existing line
/// already contains it. Repeated runs never duplicate hook entries.
pub fn ensure_script_line(path: &Path, line: &str) -> Result<()> {
    if path.exists() {
        let existing = fs::read_to_string(path)?;
        if existing.contains(line) {
            return Ok(());
        }
        let mut updated = existing;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(line);
        updated.push('\n');
        fs::write(path, updated)?;
    } else {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, format!("{line}\n"))?;
    }

    mark_executable(path)?;
    Ok(())
}

/// Serialize `value` as pretty JSON with a trailing newline and write it.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    fs::write(path, rendered)?;
    Ok(())
}

/// Git invokes hook scripts directly, so they need the executable bit.
#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
