use std::path::PathBuf;

use retro_cloud_remote::RemoteError;
use thiserror::Error;

/// Errors that abort a catalog operation.
///
/// Per-file problems (a failed download, an unreadable ROM) never surface
/// here; they are logged and the entry falls back to the placeholder.
#[derive(Debug, Error)]
pub enum LibError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ROM directory not found: {}", .0.display())]
    RomRootMissing(PathBuf),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl LibError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
