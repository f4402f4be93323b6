//! Emulator core download from the core CDN.

use std::path::Path;

use crate::error::RemoteError;
use crate::materialize::write_atomic;
use crate::source::CoreSource;

/// File names a core may be published under, in the order they are tried.
pub fn core_file_candidates(core: &str) -> [String; 4] {
    [
        format!("{core}-wasm.data"),
        format!("{core}-wasm.wasm"),
        format!("{core}.wasm"),
        format!("{core}_libretro.wasm"),
    ]
}

/// Outcome of [`fetch_core`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreStatus {
    /// A candidate file already existed locally.
    Present(String),
    /// A candidate file was downloaded.
    Downloaded { file_name: String, bytes: usize },
    /// No candidate exists on the CDN.
    Missing,
}

/// Make sure one file for `core` exists in `dest_dir`.
///
/// Candidates are checked locally first, then fetched from the CDN one by
/// one until a download succeeds. Only local write failures are errors; a
/// failed download just moves on to the next candidate.
pub fn fetch_core(
    source: &dyn CoreSource,
    core: &str,
    dest_dir: &Path,
) -> Result<CoreStatus, RemoteError> {
    let candidates = core_file_candidates(core);
    if let Some(existing) = candidates.iter().find(|name| dest_dir.join(name).is_file()) {
        log::debug!("{core}: {existing} already present");
        return Ok(CoreStatus::Present(existing.clone()));
    }

    for file_name in candidates {
        match source.fetch_core_file(&file_name) {
            Ok(payload) => {
                write_atomic(&dest_dir.join(&file_name), &payload)?;
                return Ok(CoreStatus::Downloaded {
                    file_name,
                    bytes: payload.len(),
                });
            }
            Err(e) if e.is_not_found() => log::debug!("{core}: {file_name} not on CDN"),
            Err(e) => log::warn!("{core}: {file_name} failed: {e}"),
        }
    }
    Ok(CoreStatus::Missing)
}
