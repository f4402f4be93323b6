//! Batch cover download.
//!
//! Fills the local asset store for every classified ROM that does not have
//! a cover yet, without writing a manifest.

use std::path::PathBuf;
use std::time::Duration;

use retro_cloud_core::{DirectoryTable, System};
use retro_cloud_remote::{
    CatalogCache, MatchOptions, MatchTier, ThumbnailSource, materialize, resolve_across,
};

use crate::assets::{asset_path, find_local_asset};
use crate::error::LibError;
use crate::scanner::scan_roms;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct CoverOptions {
    pub rom_dir: PathBuf,
    pub asset_dir: PathBuf,
    pub systems: Option<Vec<System>>,
    pub match_options: MatchOptions,
    pub directories: DirectoryTable,
    pub download_delay: Duration,
}

impl CoverOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rom_dir: settings.rom_dir.clone(),
            asset_dir: settings.asset_dir.clone(),
            systems: None,
            match_options: MatchOptions {
                fuzzy: settings.fuzzy,
            },
            directories: settings.directory_table(),
            download_delay: settings.remote.download_delay(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CoverEvent {
    ScanComplete { total: usize },
    /// The ROM already has a local cover.
    Existing { index: usize, file: String },
    Downloaded {
        index: usize,
        file: String,
        remote: String,
        tier: MatchTier,
    },
    NotFound { index: usize, file: String },
    Failed {
        index: usize,
        file: String,
        reason: String,
    },
    Done,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverReport {
    pub total: usize,
    pub existing: usize,
    pub downloaded: usize,
    pub not_found: usize,
    pub failed: usize,
}

/// Download missing covers for every ROM under `options.rom_dir`.
pub fn download_covers(
    options: &CoverOptions,
    source: &dyn ThumbnailSource,
    cache: &mut CatalogCache,
    on_event: &mut dyn FnMut(CoverEvent),
) -> Result<CoverReport, LibError> {
    let scan = scan_roms(&options.rom_dir, &options.directories)?;
    let entries: Vec<_> = scan
        .entries
        .into_iter()
        .filter(|e| options.systems.as_ref().is_none_or(|s| s.contains(&e.system)))
        .collect();

    let mut report = CoverReport {
        total: entries.len(),
        ..Default::default()
    };
    on_event(CoverEvent::ScanComplete { total: entries.len() });

    for (index, entry) in entries.iter().enumerate() {
        let file = entry.file_name.clone();
        if find_local_asset(&options.asset_dir, entry.system, &entry.raw_name).is_some() {
            report.existing += 1;
            on_event(CoverEvent::Existing { index, file });
            continue;
        }

        let key = entry.key();
        let Some(found) = resolve_across(&key, entry.system, cache, source, options.match_options)
        else {
            log::debug!("No remote cover for '{}' ({})", entry.file_name, key);
            report.not_found += 1;
            on_event(CoverEvent::NotFound { index, file });
            continue;
        };

        let dest = asset_path(&options.asset_dir, entry.system, &entry.raw_name);
        match materialize(source, &found.collection, &found.file_name, &dest) {
            Ok(_) => {
                report.downloaded += 1;
                on_event(CoverEvent::Downloaded {
                    index,
                    file,
                    remote: found.file_name,
                    tier: found.tier,
                });
                if !options.download_delay.is_zero() {
                    std::thread::sleep(options.download_delay);
                }
            }
            Err(e) => {
                log::warn!("Cover download failed for {}: {e}", entry.file_name);
                report.failed += 1;
                on_event(CoverEvent::Failed {
                    index,
                    file,
                    reason: e.to_string(),
                });
            }
        }
    }
    on_event(CoverEvent::Done);
    Ok(report)
}
