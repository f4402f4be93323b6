//! Download a matched cover into the local asset store.
//!
//! The thumbnail repositories store aliases as git symlinks. Fetched through
//! the static host, a symlink comes back as a short text payload holding the
//! relative path of its target, e.g. `../Named_Boxarts/Tetris (World).png`.
//! Those pointers are followed, at most [`MAX_REDIRECTS`] times.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RemoteError;
use crate::source::ThumbnailSource;

/// Leading bytes of every PNG file.
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// PNGs smaller than this are truncated or placeholder files.
pub const MIN_IMAGE_SIZE: usize = 200;

/// Maximum number of pointers followed for one file.
pub const MAX_REDIRECTS: usize = 3;

/// Pointers longer than this are not symlinks.
const MAX_POINTER_LEN: usize = 512;

/// A cover written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    pub path: PathBuf,
    /// File name that finally yielded a PNG.
    pub resolved_name: String,
    /// Pointers followed to get there.
    pub hops: usize,
    pub bytes: usize,
}

pub fn is_png(payload: &[u8]) -> bool {
    payload.starts_with(PNG_SIGNATURE)
}

/// Interpret a payload as a symlink pointer and return the target file name
/// (the last path component).
///
/// Returns `None` for anything that does not look like a single short line
/// of text naming a `.png` file.
pub fn parse_pointer(payload: &[u8]) -> Option<String> {
    if payload.is_empty() || payload.len() > MAX_POINTER_LEN {
        return None;
    }
    let text = std::str::from_utf8(payload).ok()?.trim();
    if text.is_empty() || text.contains(['\n', '\r', '\0']) {
        return None;
    }
    let target = text.rsplit('/').next()?.trim();
    let is_png_name = target
        .get(target.len().saturating_sub(4)..)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(".png"));
    if target.len() <= 4 || !is_png_name {
        return None;
    }
    Some(target.to_string())
}

/// Fetch `file_name` from `collection` and write it to `dest`.
///
/// PNG payloads are written verbatim (parent directories created) unless
/// they are smaller than [`MIN_IMAGE_SIZE`]. Pointer payloads are followed
/// within the same collection; a fourth pointer in a row fails with
/// [`RemoteError::TooManyRedirects`].
pub fn materialize(
    source: &dyn ThumbnailSource,
    collection: &str,
    file_name: &str,
    dest: &Path,
) -> Result<Materialized, RemoteError> {
    let mut current = file_name.to_string();
    for hops in 0..=MAX_REDIRECTS {
        let payload = source.fetch_boxart(collection, &current)?;
        if is_png(&payload) {
            if payload.len() < MIN_IMAGE_SIZE {
                return Err(RemoteError::TooSmall {
                    file_name: current,
                    bytes: payload.len(),
                });
            }
            write_atomic(dest, &payload)?;
            return Ok(Materialized {
                path: dest.to_path_buf(),
                resolved_name: current,
                hops,
                bytes: payload.len(),
            });
        }
        let target = parse_pointer(&payload).ok_or_else(|| RemoteError::NotAnImage {
            file_name: current.clone(),
        })?;
        log::debug!("'{current}' points to '{target}'");
        current = target;
    }
    Err(RemoteError::TooManyRedirects {
        file_name: file_name.to_string(),
        hops: MAX_REDIRECTS,
    })
}

/// Write through a sibling `.part` file so an interrupted download never
/// leaves a truncated file at `dest`. The temp file is removed on failure.
pub(crate) fn write_atomic(dest: &Path, payload: &[u8]) -> Result<(), RemoteError> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = part_path(dest);
    let written = fs::write(&tmp, payload).and_then(|()| fs::rename(&tmp, dest));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn part_path(dest: &Path) -> PathBuf {
    let mut tmp = dest.as_os_str().to_owned();
    tmp.push(".part");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_signature_detection() {
        let mut png = PNG_SIGNATURE.to_vec();
        png.extend_from_slice(b"IHDR");
        assert!(is_png(&png));
        assert!(!is_png(b"\x89PN"));
        assert!(!is_png(b"<html>404</html>"));
    }

    #[test]
    fn failed_rename_removes_part_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory where the file should go makes the rename fail.
        let dest = dir.path().join("cover.png");
        fs::create_dir_all(dest.join("occupied")).unwrap();

        assert!(write_atomic(&dest, b"payload").is_err());
        assert!(!part_path(&dest).exists());
        assert!(dest.is_dir());
    }

    #[test]
    fn pointer_takes_last_component() {
        assert_eq!(
            parse_pointer(b"../Named_Boxarts/Tetris (World).png\n").as_deref(),
            Some("Tetris (World).png")
        );
        assert_eq!(parse_pointer(b"Tetris.png").as_deref(), Some("Tetris.png"));
    }

    #[test]
    fn binary_or_multiline_payload_is_not_a_pointer() {
        assert_eq!(parse_pointer(b""), None);
        assert_eq!(parse_pointer(b"\xff\xfe\x00"), None);
        assert_eq!(parse_pointer(b"line one\nline two"), None);
        assert_eq!(parse_pointer(b"../"), None);
        assert_eq!(parse_pointer(b"<html>404</html>"), None);
        assert_eq!(parse_pointer(b".png"), None);
        assert_eq!(parse_pointer(&[b'a'; 1024]), None);
    }
}
