//! Per-collection listings of remote box-art, keyed by normalized name.

use std::collections::{BTreeMap, HashMap};

use retro_cloud_core::naming::{normalize_title, strip_extension};

use crate::source::ThumbnailSource;

/// Repository subdirectory holding box-art images.
pub const BOXART_DIR: &str = "Named_Boxarts/";

const BOXART_EXTENSION: &str = ".png";

/// The box-art files of one collection, keyed by normalized name.
///
/// Keys iterate in ascending order. When several remote files normalize to
/// the same key, the file name that sorts first is kept.
#[derive(Debug, Clone, Default)]
pub struct RemoteCatalog {
    collection: String,
    entries: BTreeMap<String, String>,
    collisions: usize,
}

impl RemoteCatalog {
    /// Build a catalog from repository tree paths. Paths outside
    /// `Named_Boxarts/` or without a `.png` extension are ignored.
    pub fn from_paths<I, S>(collection: &str, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut file_names: Vec<String> = paths
            .into_iter()
            .filter_map(|p| {
                let rest = p.as_ref().strip_prefix(BOXART_DIR)?;
                if !rest.ends_with(BOXART_EXTENSION) {
                    return None;
                }
                Some(rest.rsplit('/').next().unwrap_or(rest).to_string())
            })
            .collect();
        file_names.sort();
        file_names.dedup();

        let mut catalog = Self {
            collection: collection.to_string(),
            ..Default::default()
        };
        for file_name in file_names {
            catalog.insert(file_name);
        }
        if catalog.collisions > 0 {
            log::debug!(
                "{}: {} remote names collided with an earlier key",
                collection,
                catalog.collisions
            );
        }
        catalog
    }

    fn insert(&mut self, file_name: String) {
        let key = remote_key(&file_name);
        if key.is_empty() {
            return;
        }
        if let Some(kept) = self.entries.get(&key) {
            log::debug!("Collision on '{key}': keeping '{kept}', ignoring '{file_name}'");
            self.collisions += 1;
            return;
        }
        self.entries.insert(key, file_name);
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Remote file name stored for a normalized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stored key and file name for a normalized key.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &str)> {
        self.entries
            .get_key_value(key)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// `(key, file name)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of remote files dropped because their key was already taken.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

/// Normalized key of a remote box-art file name.
pub fn remote_key(file_name: &str) -> String {
    let title = file_name.strip_suffix(BOXART_EXTENSION).unwrap_or_else(|| strip_extension(file_name));
    normalize_title(title)
}

/// Catalogs fetched during one run.
///
/// Each collection is listed at most once. A failed listing is remembered
/// as absent so later lookups for the same collection do not hit the
/// network again.
#[derive(Debug, Default)]
pub struct CatalogCache {
    catalogs: HashMap<String, Option<RemoteCatalog>>,
    requests: usize,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog for `collection`, listing it on first use.
    pub fn get_or_fetch(
        &mut self,
        source: &dyn ThumbnailSource,
        collection: &str,
    ) -> Option<&RemoteCatalog> {
        if !self.catalogs.contains_key(collection) {
            self.requests += 1;
            log::info!("Fetching cover list for {collection}");
            let fetched = match source.list_collection(collection) {
                Ok(paths) => {
                    let catalog = RemoteCatalog::from_paths(collection, paths);
                    log::debug!("{collection}: {} covers listed", catalog.len());
                    Some(catalog)
                }
                Err(e) => {
                    log::warn!("Could not list {collection}: {e}");
                    None
                }
            };
            self.catalogs.insert(collection.to_string(), fetched);
        }
        self.catalogs.get(collection).and_then(Option::as_ref)
    }

    /// Seed the cache with an already built catalog.
    pub fn insert(&mut self, catalog: RemoteCatalog) {
        self.catalogs
            .insert(catalog.collection().to_string(), Some(catalog));
    }

    /// Whether a collection was already looked up, successfully or not.
    pub fn is_cached(&self, collection: &str) -> bool {
        self.catalogs.contains_key(collection)
    }

    /// Listing requests issued so far.
    pub fn requests(&self) -> usize {
        self.requests
    }
}
