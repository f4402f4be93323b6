//! User-supplied cover overrides.
//!
//! A JSON object mapping a ROM's file name without extension to the image
//! reference to emit for it:
//!
//! ```json
//! { "Chrono Trigger (USA)": "custom/ct.png" }
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::error::LibError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideMap {
    entries: HashMap<String, String>,
}

impl OverrideMap {
    /// Load the override file. A missing file is an empty map; a file that
    /// is not a JSON object of strings is an error.
    pub fn load(path: &Path) -> Result<Self, LibError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No override file at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let map = Self::from_json(&contents).map_err(|e| {
            LibError::config(format!("malformed override file {}: {e}", path.display()))
        })?;
        log::info!("Loaded {} cover overrides from {}", map.len(), path.display());
        Ok(map)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Image reference for a raw ROM name (file name without extension).
    pub fn get(&self, raw_name: &str) -> Option<&str> {
        self.entries.get(raw_name).map(String::as_str)
    }

    pub fn insert(&mut self, raw_name: impl Into<String>, image: impl Into<String>) {
        self.entries.insert(raw_name.into(), image.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
