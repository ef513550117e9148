//! File-backed storage under the user's state directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::{StoragePort, validate_key};

/// One JSON file per key under `~/.local/state/feedback-desk/`.
///
/// Writes are temp-file + rename, so a single key is never observed
/// half-written. There is no locking across processes: two writers racing
/// on the same key resolve to last-writer-wins.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Open the store at the default per-user state directory.
    pub fn open() -> Result<Self> {
        Ok(Self {
            base_dir: state_root()?,
        })
    }

    /// Open a store with an explicit base directory (for testing).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl StoragePort for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(raw))
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        std::fs::create_dir_all(&self.base_dir).with_context(|| {
            format!("Failed to create state directory: {}", self.base_dir.display())
        })?;
        atomic_write(&path, value.as_bytes())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}

/// Resolve the per-user state root (`~/.local/state/feedback-desk`).
fn state_root() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", "feedback-desk")
        .context("Failed to determine project directories")?;

    // state_dir() is Linux-only; fall back to data_local_dir() on macOS/Windows.
    let state_dir = proj_dirs
        .state_dir()
        .unwrap_or_else(|| proj_dirs.data_local_dir());

    Ok(state_dir.to_path_buf())
}

/// Write data to a file atomically using temp-file + rename.
fn atomic_write(target: &Path, data: &[u8]) -> Result<()> {
    let parent = target.parent().context("Target path has no parent")?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;

    std::io::Write::write_all(&mut tmp, data).context("Failed to write temp file")?;

    tmp.persist(target)
        .with_context(|| format!("Failed to persist to {}", target.display()))?;

    Ok(())
}
