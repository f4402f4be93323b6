use retro_cloud_lib::LibError;
use retro_cloud_remote::RemoteError;
use thiserror::Error;

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Catalog, settings or manifest error
    #[error("{0}")]
    Lib(#[from] LibError),

    /// HTTP client setup failed
    #[error("{0}")]
    Remote(#[from] RemoteError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
