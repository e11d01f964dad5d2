use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

pub const DATA_DIR_ENV: &str = "MOODHARMONY_HOME";
pub const CONFIG_FILENAME: &str = "config.json";
pub const IDENTITY_FILENAME: &str = "identity.json";
pub const HISTORY_FILENAME: &str = "history.json";

/// `$MOODHARMONY_HOME`, else `$HOME/.moodharmony`, else `./.moodharmony`.
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    match std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        Some(home) => PathBuf::from(home).join(".moodharmony"),
        None => PathBuf::from(".moodharmony"),
    }
}

/// Writes `bytes` next to `dst` and swaps it into place.
pub fn write_atomic(dst: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir: {}", parent.display()))?;
    }

    let tmp = dst.with_extension("json.tmp");
    fs::write(&tmp, bytes).with_context(|| format!("failed to write temp: {}", tmp.display()))?;
    replace_file(&tmp, dst)
}

/// `rename` fails on Windows when the destination exists, so move the old file aside first.
pub fn replace_file(tmp: &Path, dst: &Path) -> anyhow::Result<()> {
    let backup = dst.with_extension("bak");

    if dst.exists() {
        let _ = fs::remove_file(&backup);
        fs::rename(dst, &backup)
            .with_context(|| format!("failed rename {} -> {}", dst.display(), backup.display()))?;
    }

    if let Err(e) = fs::rename(tmp, dst) {
        // Try to restore previous file if we had one.
        if backup.exists() {
            let _ = fs::rename(&backup, dst);
        }
        let _ = fs::remove_file(tmp);
        return Err(anyhow::Error::new(e).context(format!(
            "failed rename {} -> {}",
            tmp.display(),
            dst.display()
        )));
    }

    let _ = fs::remove_file(&backup);
    Ok(())
}
