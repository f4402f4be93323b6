//! ROM tree walker.
//!
//! Walks the tree in file-name order so the manifest is stable across runs.
//! Shared extensions are resolved with a directory hint that is computed
//! once per directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use retro_cloud_core::classify::rule_for_path;
use retro_cloud_core::{DirectoryTable, System, display_name, normalize_key, strip_extension};
use walkdir::WalkDir;

use crate::error::LibError;

/// A classified ROM file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    pub path: PathBuf,
    pub file_name: String,
    /// File name without extension; used for overrides and local assets.
    pub raw_name: String,
    pub name: String,
    pub system: System,
    pub core: &'static str,
}

impl LocalEntry {
    /// Classify one file. `None` for unknown extensions.
    pub fn classify(path: &Path, hint: Option<System>) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let system = rule_for_path(path)?.resolve(hint);
        Some(Self {
            path: path.to_path_buf(),
            raw_name: strip_extension(&file_name).to_string(),
            name: display_name(&file_name),
            system,
            core: system.core(),
            file_name,
        })
    }

    /// Normalized key used for remote matching.
    pub fn key(&self) -> String {
        normalize_key(&self.file_name)
    }
}

/// Everything found under a ROM root.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Classified files in traversal order.
    pub entries: Vec<LocalEntry>,
    /// Files with an unrecognized extension.
    pub skipped: Vec<PathBuf>,
}

/// Walk `root` and classify every file.
///
/// Hidden files and directories are ignored. Unreadable subdirectories are
/// logged and skipped; only a missing root is an error.
pub fn scan_roms(root: &Path, table: &DirectoryTable) -> Result<ScanResult, LibError> {
    if !root.is_dir() {
        return Err(LibError::RomRootMissing(root.to_path_buf()));
    }

    let mut result = ScanResult::default();
    let mut hints: HashMap<PathBuf, Option<System>> = HashMap::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable path: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let dir = path.parent().unwrap_or(root);
        let hint = *hints
            .entry(dir.to_path_buf())
            .or_insert_with(|| table.system_for_path(dir));

        match LocalEntry::classify(path, hint) {
            Some(local) => {
                log::debug!("Found {} ({})", local.file_name, local.system);
                result.entries.push(local);
            }
            None => result.skipped.push(path.to_path_buf()),
        }
    }
    Ok(result)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
