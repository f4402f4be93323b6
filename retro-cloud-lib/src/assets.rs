//! Layout of the local cover store and web-relative paths.
//!
//! Covers live at `<asset_dir>/<system tag>/<raw name>.<ext>`, where the raw
//! name is the ROM file name without its extension.

use std::path::{Path, PathBuf};

use retro_cloud_core::System;

/// Images smaller than this are considered corrupt.
pub const MIN_ASSET_SIZE: u64 = retro_cloud_remote::MIN_IMAGE_SIZE as u64;

/// Extensions considered cover images, in lookup order.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|i| i.eq_ignore_ascii_case(ext)))
}

/// Where a downloaded cover for `raw_name` is stored.
pub fn asset_path(asset_dir: &Path, system: System, raw_name: &str) -> PathBuf {
    asset_dir.join(system.tag()).join(format!("{raw_name}.png"))
}

/// An existing, non-corrupt cover for `raw_name`, trying each image
/// extension in turn.
pub fn find_local_asset(asset_dir: &Path, system: System, raw_name: &str) -> Option<PathBuf> {
    let dir = asset_dir.join(system.tag());
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{raw_name}.{ext}")))
        .find(|p| {
            p.metadata()
                .is_ok_and(|m| m.is_file() && m.len() >= MIN_ASSET_SIZE)
        })
}

/// `path` relative to `web_root`, `/`-separated.
///
/// Falls back to `path` itself when no relative form exists (different
/// drive on Windows).
pub fn web_path(path: &Path, web_root: &Path) -> String {
    let relative = match (std::path::absolute(path), std::path::absolute(web_root)) {
        (Ok(path_abs), Ok(root_abs)) => pathdiff::diff_paths(path_abs, root_abs),
        _ => pathdiff::diff_paths(path, web_root),
    };
    let relative = relative.unwrap_or_else(|| path.to_path_buf());
    relative.to_string_lossy().replace('\\', "/")
}
