//! Run configuration.
//!
//! Looked up in order: an explicit `--config` path, `./retro-cloud.toml`,
//! then `~/.config/retro-cloud/settings.toml`. With none present the
//! defaults apply. Every key is optional.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use retro_cloud_core::{DirectoryTable, System};
use retro_cloud_remote::RemoteConfig;
use serde::{Deserialize, Serialize};

use crate::error::LibError;

/// Settings file looked up in the working directory.
pub const LOCAL_SETTINGS_FILE: &str = "retro-cloud.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the ROM tree.
    pub rom_dir: PathBuf,
    /// Cover store, one subdirectory per system tag.
    pub asset_dir: PathBuf,
    /// Manifest output path.
    pub output: PathBuf,
    pub override_file: PathBuf,
    /// Image reference emitted when no cover is found.
    pub placeholder: String,
    /// Manifest paths are written relative to this directory.
    pub web_root: PathBuf,
    /// Where `cores` stores downloaded emulator cores.
    pub cores_dir: PathBuf,
    /// Compute a CRC32 per ROM.
    pub checksums: bool,
    /// Emit remote URLs instead of downloading covers.
    pub link_remote: bool,
    /// Query the thumbnail repositories for covers without a local asset.
    pub resolve_remote: bool,
    /// Enable the fuzzy and substring match tiers.
    pub fuzzy: bool,
    /// Extra directory names mapped to systems, on top of the built-in aliases.
    pub directories: BTreeMap<String, System>,
    pub remote: RemoteConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rom_dir: PathBuf::from("public/roms"),
            asset_dir: PathBuf::from("public/logos"),
            output: PathBuf::from("public/data/gamelist.json"),
            override_file: PathBuf::from("cover_map.json"),
            placeholder: "assets/default.png".to_string(),
            web_root: PathBuf::from("."),
            cores_dir: PathBuf::from("public/data/cores"),
            checksums: true,
            link_remote: false,
            resolve_remote: true,
            fuzzy: true,
            directories: BTreeMap::new(),
            remote: RemoteConfig::default(),
        }
    }
}

/// Settings together with the file they came from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// `None` when the defaults were used.
    pub path: Option<PathBuf>,
}

/// Canonical path to the per-user settings file.
pub fn user_settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("retro-cloud").join("settings.toml")
}

/// The settings file that [`Settings::load`] would read, if any.
pub fn find_settings_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    [PathBuf::from(LOCAL_SETTINGS_FILE), user_settings_path()]
        .into_iter()
        .find(|p| p.is_file())
}

impl Settings {
    /// Load settings following the lookup order. An explicit path that does
    /// not exist or does not parse is an error.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedSettings, LibError> {
        match find_settings_file(explicit) {
            Some(path) => {
                let settings = Self::from_file(&path)?;
                log::debug!("Loaded settings from {}", path.display());
                Ok(LoadedSettings {
                    settings,
                    path: Some(path),
                })
            }
            None => Ok(LoadedSettings {
                settings: Self::default(),
                path: None,
            }),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, LibError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LibError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
            .map_err(|e| LibError::config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn to_toml(&self) -> Result<String, LibError> {
        toml::to_string_pretty(self).map_err(|e| LibError::config(e.to_string()))
    }

    /// Write the settings atomically, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), LibError> {
        let serialized = self.to_toml()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, &serialized)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Built-in directory aliases plus the configured extras.
    pub fn directory_table(&self) -> DirectoryTable {
        let mut table = DirectoryTable::default();
        for (name, system) in &self.directories {
            table.insert(name, *system);
        }
        table
    }
}
