use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::catalog::BOXART_DIR;
use crate::error::RemoteError;
use crate::source::{CoreSource, ThumbnailSource};

/// Environment variable holding an optional GitHub token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Where the thumbnail repositories and the core CDN live, and how to talk
/// to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// GitHub REST API host used for tree listings.
    pub api_host: String,
    /// Host serving raw repository files.
    pub static_host: String,
    /// Organization owning one repository per collection.
    pub org: String,
    /// Base URL of the emulator core CDN.
    pub core_cdn: String,
    pub timeout_secs: u64,
    /// Pause after each successful download.
    pub download_delay_ms: u64,
    pub user_agent: String,
    /// Bearer token for the API host. Never written to disk; read from
    /// `GITHUB_TOKEN` when the client is built.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_host: "https://api.github.com".to_string(),
            static_host: "https://raw.githubusercontent.com".to_string(),
            org: "libretro-thumbnails".to_string(),
            core_cdn: "https://cdn.emulatorjs.org/latest/data/cores".to_string(),
            timeout_secs: 15,
            download_delay_ms: 100,
            user_agent: format!("retro-cloud/{}", env!("CARGO_PKG_VERSION")),
            token: None,
        }
    }
}

impl RemoteConfig {
    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }

    /// `GET` URL listing a collection's full repository tree.
    pub fn tree_url(&self, collection: &str) -> String {
        format!(
            "{}/repos/{}/{}/git/trees/master?recursive=1",
            self.api_host.trim_end_matches('/'),
            self.org,
            collection
        )
    }

    /// `GET` URL of a box-art file, with the file name percent-escaped.
    pub fn boxart_url(&self, collection: &str, file_name: &str) -> String {
        format!(
            "{}/{}/{}/master/{}{}",
            self.static_host.trim_end_matches('/'),
            self.org,
            collection,
            BOXART_DIR,
            urlencoding::encode(file_name)
        )
    }

    /// `GET` URL of a core file on the CDN.
    pub fn core_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.core_cdn.trim_end_matches('/'), file_name)
    }
}

/// Response of the git trees endpoint. Only the paths are needed.
#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeItem {
    path: String,
}

/// Blocking HTTP client for the libretro thumbnail repositories and the
/// core CDN.
pub struct LibretroClient {
    http: Client,
    config: RemoteConfig,
}

impl LibretroClient {
    /// Build a client. A token in `GITHUB_TOKEN` is picked up when the
    /// config does not already carry one.
    pub fn new(mut config: RemoteConfig) -> Result<Self, RemoteError> {
        if config.token.is_none() {
            config.token = std::env::var(TOKEN_ENV)
                .ok()
                .filter(|t| !t.trim().is_empty());
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn get(&self, url: &str, authorized: bool) -> Result<Response, RemoteError> {
        log::debug!("GET {url}");
        let mut request = self
            .http
            .get(url)
            .header(USER_AGENT, self.config.user_agent.as_str());
        if authorized {
            request = request.header(ACCEPT, "application/vnd.github+json");
            if let Some(ref token) = self.config.token {
                request = request.header(AUTHORIZATION, format!("Bearer {token}"));
            }
        }
        let resp = request.send()?;
        check_status(resp, url)
    }
}

/// Map non-success responses to errors. GitHub reports an exhausted quota
/// either as 429 or as 403 with `x-ratelimit-remaining: 0`.
fn check_status(resp: Response, url: &str) -> Result<Response, RemoteError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let quota_exhausted = resp
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");
    if status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && quota_exhausted)
    {
        return Err(RemoteError::RateLimited);
    }
    Err(RemoteError::Status {
        status: status.as_u16(),
        url: url.to_string(),
    })
}

impl ThumbnailSource for LibretroClient {
    fn list_collection(&self, collection: &str) -> Result<Vec<String>, RemoteError> {
        let url = self.config.tree_url(collection);
        let text = self.get(&url, true)?.text()?;
        let listing: TreeResponse = serde_json::from_str(&text)?;
        if listing.truncated {
            log::warn!("Listing for {collection} was truncated by the API; some covers may be missed");
        }
        Ok(listing.tree.into_iter().map(|item| item.path).collect())
    }

    fn fetch_boxart(&self, collection: &str, file_name: &str) -> Result<Vec<u8>, RemoteError> {
        let url = self.config.boxart_url(collection, file_name);
        let bytes = self.get(&url, false)?.bytes()?;
        Ok(bytes.to_vec())
    }

    fn boxart_url(&self, collection: &str, file_name: &str) -> String {
        self.config.boxart_url(collection, file_name)
    }
}

impl CoreSource for LibretroClient {
    fn fetch_core_file(&self, file_name: &str) -> Result<Vec<u8>, RemoteError> {
        let url = self.config.core_url(file_name);
        let bytes = self.get(&url, false)?.bytes()?;
        Ok(bytes.to_vec())
    }
}
