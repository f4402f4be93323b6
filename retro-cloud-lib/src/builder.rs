//! Catalog builder: ROM tree in, manifest out.
//!
//! Every classified ROM becomes one manifest entry. Its cover is chosen in
//! this order, first hit wins:
//!
//! 1. the override map, keyed by raw name;
//! 2. an existing image in the local asset store;
//! 3. a remote match, downloaded into the asset store (or linked when
//!    `link_remote` is set), only when remote resolution is enabled;
//! 4. the placeholder.
//!
//! Cover failures are never fatal. The manifest is written once, after the
//! whole tree has been processed.

use std::path::PathBuf;
use std::time::Duration;

use retro_cloud_core::{DirectoryTable, System};
use retro_cloud_remote::{
    CatalogCache, MatchOptions, ThumbnailSource, materialize, resolve_across,
};

use crate::assets::{asset_path, find_local_asset, web_path};
use crate::error::LibError;
use crate::hasher::crc32_file;
use crate::manifest::{Manifest, ManifestEntry};
use crate::overrides::OverrideMap;
use crate::scanner::{LocalEntry, scan_roms};
use crate::settings::Settings;

/// Options for one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub rom_dir: PathBuf,
    pub asset_dir: PathBuf,
    pub output: PathBuf,
    pub placeholder: String,
    pub web_root: PathBuf,
    pub checksums: bool,
    pub link_remote: bool,
    pub resolve_remote: bool,
    pub match_options: MatchOptions,
    /// Only include these systems; `None` includes all.
    pub systems: Option<Vec<System>>,
    pub directories: DirectoryTable,
    /// Pause after each successful download.
    pub download_delay: Duration,
}

impl BuildOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rom_dir: settings.rom_dir.clone(),
            asset_dir: settings.asset_dir.clone(),
            output: settings.output.clone(),
            placeholder: settings.placeholder.clone(),
            web_root: settings.web_root.clone(),
            checksums: settings.checksums,
            link_remote: settings.link_remote,
            resolve_remote: settings.resolve_remote,
            match_options: MatchOptions {
                fuzzy: settings.fuzzy,
            },
            systems: None,
            directories: settings.directory_table(),
            download_delay: settings.remote.download_delay(),
        }
    }

    fn includes(&self, system: System) -> bool {
        self.systems.as_ref().is_none_or(|s| s.contains(&system))
    }
}

/// Where an entry's image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Override,
    Local,
    Downloaded,
    Linked,
    Placeholder,
}

/// Progress events emitted during a build.
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// Walking the ROM tree.
    Scanning,
    /// Walk complete. `total` counts entries that will be processed.
    ScanComplete { total: usize, skipped: usize },
    /// An entry has started processing.
    EntryStarted { index: usize, file: String },
    /// Looking the entry up in the remote catalogs.
    Resolving { index: usize, file: String },
    /// The entry is final.
    EntryCompleted {
        index: usize,
        file: String,
        source: ImageSource,
    },
    /// A cover could not be obtained (non-fatal).
    ImageFailed {
        index: usize,
        file: String,
        reason: String,
    },
    /// The manifest was written.
    Written { path: PathBuf, entries: usize },
    /// All entries processed.
    Done,
}

/// Counts for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub entries: usize,
    /// Files with unrecognized extensions.
    pub skipped: usize,
    /// Classified files excluded by the system filter.
    pub filtered: usize,
    pub overrides: usize,
    pub local: usize,
    pub downloaded: usize,
    pub linked: usize,
    pub placeholders: usize,
    /// Remote matches whose download failed.
    pub failures: usize,
    /// Where the manifest was written; `None` when nothing was found.
    pub written: Option<PathBuf>,
}

impl BuildReport {
    fn count(&mut self, source: ImageSource) {
        match source {
            ImageSource::Override => self.overrides += 1,
            ImageSource::Local => self.local += 1,
            ImageSource::Downloaded => self.downloaded += 1,
            ImageSource::Linked => self.linked += 1,
            ImageSource::Placeholder => self.placeholders += 1,
        }
    }
}

#[derive(Debug)]
pub struct BuildResult {
    pub manifest: Manifest,
    pub report: BuildReport,
}

/// Shared state for resolving covers during one build.
struct CoverResolver<'a> {
    options: &'a BuildOptions,
    source: &'a dyn ThumbnailSource,
    cache: &'a mut CatalogCache,
    overrides: &'a OverrideMap,
}

impl CoverResolver<'_> {
    fn resolve(
        &mut self,
        index: usize,
        entry: &LocalEntry,
        report: &mut BuildReport,
        on_event: &mut dyn FnMut(BuildEvent),
    ) -> (String, ImageSource) {
        let options = self.options;
        if let Some(image) = self.overrides.get(&entry.raw_name) {
            log::debug!("Using mapped cover for {}", entry.raw_name);
            return (image.to_string(), ImageSource::Override);
        }
        if let Some(path) = find_local_asset(&options.asset_dir, entry.system, &entry.raw_name) {
            return (web_path(&path, &options.web_root), ImageSource::Local);
        }
        if !options.resolve_remote {
            return (options.placeholder.clone(), ImageSource::Placeholder);
        }

        on_event(BuildEvent::Resolving {
            index,
            file: entry.file_name.clone(),
        });
        let key = entry.key();
        let Some(found) = resolve_across(
            &key,
            entry.system,
            self.cache,
            self.source,
            options.match_options,
        ) else {
            log::debug!("No remote cover for '{}' ({})", entry.file_name, key);
            return (options.placeholder.clone(), ImageSource::Placeholder);
        };

        if options.link_remote {
            let url = self.source.boxart_url(&found.collection, &found.file_name);
            return (url, ImageSource::Linked);
        }

        let dest = asset_path(&options.asset_dir, entry.system, &entry.raw_name);
        match materialize(self.source, &found.collection, &found.file_name, &dest) {
            Ok(done) => {
                log::info!(
                    "Downloaded cover for {} ({} match: {})",
                    entry.raw_name,
                    found.tier,
                    done.resolved_name
                );
                if !options.download_delay.is_zero() {
                    std::thread::sleep(options.download_delay);
                }
                (web_path(&dest, &options.web_root), ImageSource::Downloaded)
            }
            Err(e) => {
                log::warn!("Cover download failed for {}: {e}", entry.file_name);
                report.failures += 1;
                on_event(BuildEvent::ImageFailed {
                    index,
                    file: entry.file_name.clone(),
                    reason: e.to_string(),
                });
                (options.placeholder.clone(), ImageSource::Placeholder)
            }
        }
    }
}

/// Build the manifest for `options.rom_dir` and write it to `options.output`.
///
/// Only setup problems are errors: a missing ROM root or a failed manifest
/// write. When no ROM is found nothing is written.
pub fn build_manifest(
    options: &BuildOptions,
    source: &dyn ThumbnailSource,
    cache: &mut CatalogCache,
    overrides: &OverrideMap,
    on_event: &mut dyn FnMut(BuildEvent),
) -> Result<BuildResult, LibError> {
    on_event(BuildEvent::Scanning);
    let scan = scan_roms(&options.rom_dir, &options.directories)?;

    let mut report = BuildReport {
        skipped: scan.skipped.len(),
        ..Default::default()
    };
    let (entries, excluded): (Vec<LocalEntry>, Vec<LocalEntry>) = scan
        .entries
        .into_iter()
        .partition(|e| options.includes(e.system));
    report.filtered = excluded.len();

    on_event(BuildEvent::ScanComplete {
        total: entries.len(),
        skipped: report.skipped,
    });

    let mut resolver = CoverResolver {
        options,
        source,
        cache,
        overrides,
    };
    let mut manifest = Manifest::new();

    for (index, entry) in entries.iter().enumerate() {
        on_event(BuildEvent::EntryStarted {
            index,
            file: entry.file_name.clone(),
        });

        let (image, image_source) = resolver.resolve(index, entry, &mut report, on_event);
        report.count(image_source);

        let crc32 = if options.checksums {
            match crc32_file(&entry.path) {
                Ok(crc) => Some(crc),
                Err(e) => {
                    log::warn!("Could not checksum {}: {e}", entry.path.display());
                    None
                }
            }
        } else {
            None
        };

        manifest.push(ManifestEntry {
            id: retro_cloud_core::entry_id(&entry.file_name),
            name: entry.name.clone(),
            system: entry.system,
            rom_path: web_path(&entry.path, &options.web_root),
            core: entry.core.to_string(),
            image,
            crc32,
        });
        on_event(BuildEvent::EntryCompleted {
            index,
            file: entry.file_name.clone(),
            source: image_source,
        });
    }

    report.entries = manifest.len();
    if manifest.is_empty() {
        log::warn!("No games found in {}", options.rom_dir.display());
    } else {
        manifest.write_atomic(&options.output)?;
        log::debug!(
            "Wrote {} with {} games",
            options.output.display(),
            manifest.len()
        );
        on_event(BuildEvent::Written {
            path: options.output.clone(),
            entries: manifest.len(),
        });
        report.written = Some(options.output.clone());
    }
    on_event(BuildEvent::Done);

    Ok(BuildResult { manifest, report })
}
