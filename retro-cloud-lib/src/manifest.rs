//! The JSON catalog consumed by the web player.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use retro_cloud_core::System;
use serde::{Deserialize, Serialize};

use crate::error::LibError;

/// One playable game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub name: String,
    pub system: System,
    /// ROM location relative to the web root, `/`-separated.
    pub rom_path: String,
    pub core: String,
    /// Cover: a web-root relative path, an absolute URL, or the placeholder.
    pub image: String,
    /// CRC32 of the ROM file, 8 uppercase hex digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crc32: Option<String>,
}

/// Entries in directory traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter()
    }

    /// Distinct cores referenced by the manifest, sorted.
    pub fn cores(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.core.as_str()).collect()
    }

    pub fn load(path: &Path) -> Result<Self, LibError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Pretty JSON with 4-space indentation and non-ASCII kept as is.
    pub fn to_json_pretty(&self) -> Result<String, LibError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| LibError::config(e.to_string()))
    }

    /// Write the manifest through a temp file in the same directory, then
    /// rename it over `path`. Parent directories are created.
    pub fn write_atomic(&self, path: &Path) -> Result<(), LibError> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(path);
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, core: &str, crc32: Option<&str>) -> ManifestEntry {
        ManifestEntry {
            id: id.to_string(),
            name: "Pokémon Snap".to_string(),
            system: System::N64,
            rom_path: "public/roms/n64/snap.z64".to_string(),
            core: core.to_string(),
            image: "assets/default.png".to_string(),
            crc32: crc32.map(str::to_string),
        }
    }

    #[test]
    fn crc32_is_omitted_when_absent() {
        let mut manifest = Manifest::new();
        manifest.push(entry("a", "mupen64plus_next", None));
        let json = manifest.to_json_pretty().unwrap();
        assert!(!json.contains("crc32"));
        assert!(json.contains("\"system\": \"n64\""));
    }

    #[test]
    fn pretty_output_keeps_unicode_and_four_space_indent() {
        let mut manifest = Manifest::new();
        manifest.push(entry("a", "mupen64plus_next", Some("CBF43926")));
        let json = manifest.to_json_pretty().unwrap();
        assert!(json.starts_with("[\n    {\n        \"id\": \"a\""));
        assert!(json.contains("Pokémon Snap"));
        assert!(json.contains("\"crc32\": \"CBF43926\""));
    }

    #[test]
    fn write_atomic_creates_parents_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public").join("data").join("gamelist.json");
        let mut manifest = Manifest::new();
        manifest.push(entry("a", "mupen64plus_next", None));
        manifest.push(entry("b", "fbneo", Some("00000000")));
        manifest.write_atomic(&path).unwrap();

        assert!(!tmp_path(&path).exists());
        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn cores_are_distinct_and_sorted() {
        let mut manifest = Manifest::new();
        manifest.push(entry("a", "snes9x", None));
        manifest.push(entry("b", "fbneo", None));
        manifest.push(entry("c", "snes9x", None));
        assert_eq!(manifest.cores().into_iter().collect::<Vec<_>>(), ["fbneo", "snes9x"]);
    }
}
