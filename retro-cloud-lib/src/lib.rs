//! Catalog building for retro-cloud: walks a ROM tree, resolves covers and
//! writes the manifest the web player reads.

pub mod assets;
pub mod builder;
pub mod covers;
pub mod error;
pub mod hasher;
pub mod maintenance;
pub mod manifest;
pub mod overrides;
pub mod scanner;
pub mod settings;

pub use builder::{BuildEvent, BuildOptions, BuildReport, BuildResult, ImageSource, build_manifest};
pub use covers::{CoverEvent, CoverOptions, CoverReport, download_covers};
pub use error::LibError;
pub use maintenance::{MIN_ASSET_SIZE, PurgeReport, purge_corrupt_assets};
pub use manifest::{Manifest, ManifestEntry};
pub use overrides::OverrideMap;
pub use scanner::{LocalEntry, ScanResult, scan_roms};
pub use settings::{LoadedSettings, Settings};
