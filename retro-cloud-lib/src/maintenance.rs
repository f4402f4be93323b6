//! Cleanup of broken cover images.
//!
//! Interrupted or rejected downloads tend to leave tiny files behind (an
//! HTML error page, an empty file, a symlink pointer saved verbatim). Any
//! image under [`MIN_ASSET_SIZE`] bytes is treated as corrupt.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::assets::is_image;
use crate::error::LibError;

pub use crate::assets::MIN_ASSET_SIZE;

#[derive(Debug, Default)]
pub struct PurgeReport {
    /// Images checked.
    pub scanned: usize,
    /// Corrupt images removed (or that would be, in a dry run).
    pub removed: Vec<PathBuf>,
    /// Corrupt images that could not be removed.
    pub failed: Vec<(PathBuf, String)>,
}

/// Delete every image under `asset_dir` smaller than `min_size` bytes.
///
/// A missing asset directory is not an error. With `dry_run` nothing is
/// deleted but the report lists what would be.
pub fn purge_corrupt_assets(
    asset_dir: &Path,
    min_size: u64,
    dry_run: bool,
) -> Result<PurgeReport, LibError> {
    let mut report = PurgeReport::default();
    if !asset_dir.exists() {
        log::debug!("No asset directory at {}", asset_dir.display());
        return Ok(report);
    }

    for entry in WalkDir::new(asset_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }
        report.scanned += 1;
        let size = entry.metadata()?.len();
        if size >= min_size {
            continue;
        }

        let path = entry.into_path();
        if dry_run {
            log::info!("Would remove corrupt image {} ({size} bytes)", path.display());
            report.removed.push(path);
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Removed corrupt image {} ({size} bytes)", path.display());
                report.removed.push(path);
            }
            Err(e) => {
                log::warn!("Could not remove {}: {e}", path.display());
                report.failed.push((path, e.to_string()));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, len: usize) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![0u8; len]).unwrap();
    }

    #[test]
    fn removes_small_images_only() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("nes/tiny.png"), 10);
        write(&root.join("nes/edge.jpg"), 199);
        write(&root.join("nes/ok.png"), 200);
        write(&root.join("snes/big.webp"), 4096);
        write(&root.join("snes/notes.txt"), 3);

        let report = purge_corrupt_assets(root, MIN_ASSET_SIZE, false).unwrap();
        assert_eq!(report.scanned, 4);
        assert_eq!(report.removed.len(), 2);
        assert!(!root.join("nes/tiny.png").exists());
        assert!(!root.join("nes/edge.jpg").exists());
        assert!(root.join("nes/ok.png").exists());
        assert!(root.join("snes/big.webp").exists());
        assert!(root.join("snes/notes.txt").exists());
    }

    #[test]
    fn dry_run_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("a.PNG"), 0);
        let report = purge_corrupt_assets(dir.path(), MIN_ASSET_SIZE, true).unwrap();
        assert_eq!(report.removed.len(), 1);
        assert!(dir.path().join("a.PNG").exists());
    }

    #[test]
    fn missing_directory_is_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = purge_corrupt_assets(&dir.path().join("assets"), MIN_ASSET_SIZE, false).unwrap();
        assert_eq!(report.scanned, 0);
    }
}
