//! The seams between resolution logic and the network.
//!
//! Everything above this layer (catalog cache, matcher, materializer, core
//! fetcher) talks to these traits, so tests can swap in an in-memory store.

use crate::error::RemoteError;

/// A store of per-collection cover images.
pub trait ThumbnailSource {
    /// List every path in the collection's repository tree.
    fn list_collection(&self, collection: &str) -> Result<Vec<String>, RemoteError>;

    /// Fetch the raw payload stored under `Named_Boxarts/{file_name}`.
    ///
    /// The payload is either a PNG or a short text pointer naming another
    /// file in the same collection.
    fn fetch_boxart(&self, collection: &str, file_name: &str) -> Result<Vec<u8>, RemoteError>;

    /// Public URL of a box-art file, used when linking instead of downloading.
    fn boxart_url(&self, collection: &str, file_name: &str) -> String;
}

/// A store of emulator core binaries.
pub trait CoreSource {
    /// Fetch one core file by name. A missing file is `RemoteError::Status`
    /// with status 404.
    fn fetch_core_file(&self, file_name: &str) -> Result<Vec<u8>, RemoteError>;
}
