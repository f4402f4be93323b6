/// Errors that can occur while talking to the thumbnail repositories or the
/// emulator core CDN.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Rate limited by the GitHub API (set GITHUB_TOKEN to raise the limit)")]
    RateLimited,

    #[error("'{file_name}' is neither a PNG nor a redirect pointer")]
    NotAnImage { file_name: String },

    #[error("'{file_name}' is only {bytes} bytes, too small to be a cover")]
    TooSmall { file_name: String, bytes: usize },

    #[error("'{file_name}' still unresolved after {hops} redirect hops")]
    TooManyRedirects { file_name: String, hops: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RemoteError {
    /// True for a plain 404, which callers treat as "not there" rather than
    /// as a failure worth reporting.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
