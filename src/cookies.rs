//! Persistent cookie jar bootstrap.
//!
//! Some hosts only answer when a cookie can be stored and replayed, so the
//! client keeps a jar file across calls. The jar lives under the XDG state
//! dir unless the config overrides it; construction of a client fails when
//! the location is unusable.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default jar location: `~/.local/state/fetchgate/cookies.txt`.
pub fn default_jar_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fetchgate")?;
    Ok(xdg_dirs.get_state_home().join("cookies.txt"))
}

/// Ensures the jar file exists, creating parent dirs and an empty file when
/// missing. Errors when the location cannot be created.
pub fn ensure_jar(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating cookie jar dir {}", parent.display()))?;
    }
    fs::File::create(path)
        .with_context(|| format!("creating cookie jar {}", path.display()))?;
    Ok(())
}
