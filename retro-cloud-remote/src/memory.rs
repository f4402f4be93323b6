//! In-memory thumbnail and core store for tests.
//!
//! Only compiled for this crate's tests or with the `test-support` feature.
//! Records every request so tests can assert on how often a collection was
//! listed or a file fetched.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::catalog::BOXART_DIR;
use crate::error::RemoteError;
use crate::source::{CoreSource, ThumbnailSource};

#[derive(Debug, Default)]
pub struct MemorySource {
    listings: HashMap<String, Vec<String>>,
    boxart: HashMap<(String, String), Vec<u8>>,
    cores: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
    listed: RefCell<Vec<String>>,
    fetched: RefCell<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a box-art payload and list it in the collection's tree.
    pub fn with_boxart(mut self, collection: &str, file_name: &str, payload: &[u8]) -> Self {
        self.listings
            .entry(collection.to_string())
            .or_default()
            .push(format!("{BOXART_DIR}{file_name}"));
        self.boxart.insert(
            (collection.to_string(), file_name.to_string()),
            payload.to_vec(),
        );
        self
    }

    /// Store a redirect pointer from `file_name` to `target`.
    pub fn with_pointer(self, collection: &str, file_name: &str, target: &str) -> Self {
        let pointer = format!("../{BOXART_DIR}{target}");
        self.with_boxart(collection, file_name, pointer.as_bytes())
    }

    /// Make listing `collection` fail as if rate limited.
    pub fn with_failing_listing(mut self, collection: &str) -> Self {
        self.failing.insert(collection.to_string());
        self
    }

    pub fn with_core(mut self, file_name: &str, payload: &[u8]) -> Self {
        self.cores.insert(file_name.to_string(), payload.to_vec());
        self
    }

    /// Collections listed so far, in request order.
    pub fn listed(&self) -> Vec<String> {
        self.listed.borrow().clone()
    }

    /// Box-art and core file names fetched so far, in request order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }

    fn not_found(what: &str) -> RemoteError {
        RemoteError::Status {
            status: 404,
            url: format!("memory://{what}"),
        }
    }
}

impl ThumbnailSource for MemorySource {
    fn list_collection(&self, collection: &str) -> Result<Vec<String>, RemoteError> {
        self.listed.borrow_mut().push(collection.to_string());
        if self.failing.contains(collection) {
            return Err(RemoteError::RateLimited);
        }
        self.listings
            .get(collection)
            .cloned()
            .ok_or_else(|| Self::not_found(collection))
    }

    fn fetch_boxart(&self, collection: &str, file_name: &str) -> Result<Vec<u8>, RemoteError> {
        self.fetched.borrow_mut().push(file_name.to_string());
        self.boxart
            .get(&(collection.to_string(), file_name.to_string()))
            .cloned()
            .ok_or_else(|| Self::not_found(&format!("{collection}/{file_name}")))
    }

    fn boxart_url(&self, collection: &str, file_name: &str) -> String {
        format!("memory://{collection}/{file_name}")
    }
}

impl CoreSource for MemorySource {
    fn fetch_core_file(&self, file_name: &str) -> Result<Vec<u8>, RemoteError> {
        self.fetched.borrow_mut().push(file_name.to_string());
        self.cores
            .get(file_name)
            .cloned()
            .ok_or_else(|| Self::not_found(file_name))
    }
}
