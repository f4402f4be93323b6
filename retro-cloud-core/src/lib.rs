//! Shared vocabulary for retro-cloud: emulated systems, the extension and
//! directory tables used to classify ROM files, and name normalization.

pub mod classify;
pub mod naming;
pub mod system;

pub use classify::{DirectoryTable, ExtensionRule, classify, extension_rule, extensions_for};
pub use naming::{
    display_name, entry_id, normalize_key, normalize_title, strip_extension, strip_tags,
    thumbnail_safe_name,
};
pub use system::{System, SystemParseError};
