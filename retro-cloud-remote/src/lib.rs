//! Remote side of retro-cloud: listing the libretro thumbnail repositories,
//! matching local names against them, downloading covers, and fetching
//! emulator cores.

pub mod catalog;
pub mod client;
pub mod cores;
pub mod error;
pub mod matcher;
pub mod materialize;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod source;

pub use catalog::{CatalogCache, RemoteCatalog};
pub use client::{LibretroClient, RemoteConfig};
pub use cores::{CoreStatus, core_file_candidates, fetch_core};
pub use error::RemoteError;
pub use matcher::{
    Candidate, FUZZY_THRESHOLD, MIN_SUBSTRING_LEN, Match, MatchOptions, MatchTier, candidates,
    resolve, resolve_across, resolve_in,
};
pub use materialize::{
    MAX_REDIRECTS, MIN_IMAGE_SIZE, Materialized, PNG_SIGNATURE, is_png, materialize,
};
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemorySource;
pub use source::{CoreSource, ThumbnailSource};
