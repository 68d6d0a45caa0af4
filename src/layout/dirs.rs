//! Output directory preparation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{FsOperation, PlanSplitError, Result};

/// Directory receiving the prior state of each resource.
pub const BEFORE_DIR: &str = "before";

/// Directory receiving the subsequent state of each resource.
pub const AFTER_DIR: &str = "after";

/// Layout of the output tree under a base directory.
///
/// The `before` and `after` subdirectories are owned by this tool and are
/// wiped on every [`prepare`](Self::prepare).
#[derive(Debug, Clone)]
pub struct OutputLayout {
    /// Base directory.
    base_dir: PathBuf,
    /// `base/before`.
    before_dir: PathBuf,
    /// `base/after`.
    after_dir: PathBuf,
}

impl OutputLayout {
    /// Creates a layout rooted at `base_dir`. Nothing is touched on disk.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let before_dir = base_dir.join(BEFORE_DIR);
        let after_dir = base_dir.join(AFTER_DIR);

        Self {
            base_dir,
            before_dir,
            after_dir,
        }
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the `before` directory.
    #[must_use]
    pub fn before_dir(&self) -> &Path {
        &self.before_dir
    }

    /// Returns the `after` directory.
    #[must_use]
    pub fn after_dir(&self) -> &Path {
        &self.after_dir
    }

    /// Removes and recreates the `before` and `after` directories.
    ///
    /// Anything previously stored under them is deleted. Other entries of
    /// the base directory are left alone.
    ///
    /// # Errors
    ///
    /// Returns a filesystem error if a directory cannot be removed or created.
    pub fn prepare(&self) -> Result<()> {
        info!("Preparing output directory: {}", self.base_dir.display());

        for dir in [&self.before_dir, &self.after_dir] {
            remove_dir_if_exists(dir)?;
        }
        for dir in [&self.before_dir, &self.after_dir] {
            debug!("Creating directory: {}", dir.display());
            fs::create_dir_all(dir)
                .map_err(|e| PlanSplitError::fs(FsOperation::CreateDir, dir, e))?;
        }

        Ok(())
    }
}

/// Recursively removes `dir`; a missing directory is not an error.
fn remove_dir_if_exists(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            debug!("Removed stale directory: {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PlanSplitError::fs(FsOperation::RemoveDir, dir, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_layout() -> (OutputLayout, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let layout = OutputLayout::new(temp_dir.path().join("diff"));
        (layout, temp_dir)
    }

    #[test]
    fn test_prepare_creates_both_dirs() {
        let (layout, _temp) = create_test_layout();

        layout.prepare().expect("prepare failed");

        assert!(layout.before_dir().is_dir());
        assert!(layout.after_dir().is_dir());
    }

    #[test]
    fn test_prepare_wipes_stale_files_only_in_owned_dirs() {
        let (layout, _temp) = create_test_layout();
        layout.prepare().expect("prepare failed");

        let stale = layout.before_dir().join("old.json");
        let nested = layout.after_dir().join("nested");
        let unrelated = layout.base_dir().join("keep.txt");
        fs::write(&stale, "{}").expect("write stale");
        fs::create_dir(&nested).expect("create nested");
        fs::write(&unrelated, "keep").expect("write unrelated");

        layout.prepare().expect("second prepare failed");

        assert!(!stale.exists());
        assert!(!nested.exists());
        assert!(unrelated.exists());
        assert_eq!(fs::read_dir(layout.before_dir()).expect("read dir").count(), 0);
    }

    #[test]
    fn test_prepare_fails_when_base_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path().join("diff");
        fs::write(&base, "not a directory").expect("write file");

        let err = OutputLayout::new(&base).prepare().expect_err("must fail");
        assert!(matches!(err, PlanSplitError::Filesystem(_)));
    }
}
