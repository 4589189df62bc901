use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

///
/// A scoped scratch directory for canonical record files.
///
/// Acquiring the directory creates it, clearing any stale contents from an
/// earlier run. The directory is removed again on every exit path: call
/// [`ScratchDir::remove`] after the last builder of a class finishes, and
/// the drop guard covers early returns.
///
/// The scratch area is a single-writer resource for the duration of one
/// project+genome run; concurrent runs over the same area must be
/// serialized by the caller.
///
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    armed: bool,
}

impl ScratchDir {
    ///
    /// Create (or clear) the scratch directory at the given path.
    ///
    /// # Arguments
    ///
    /// - path: location of the scratch directory
    ///
    pub fn acquire(path: &Path) -> Result<ScratchDir> {
        if path.exists() {
            fs::remove_dir_all(path)
                .with_context(|| format!("Failed to clear stale scratch directory: {:?}", path))?;
        }

        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create scratch directory: {:?}", path))?;

        Ok(ScratchDir {
            path: path.to_path_buf(),
            armed: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file inside the scratch directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Remove the scratch directory, consuming the guard.
    pub fn remove(mut self) -> Result<()> {
        self.armed = false;
        fs::remove_dir_all(&self.path)
            .with_context(|| format!("Failed to remove scratch directory: {:?}", self.path))?;
        Ok(())
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}
