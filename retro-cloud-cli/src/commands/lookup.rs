use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_cloud_core::{System, normalize_key, strip_extension, thumbnail_safe_name};
use retro_cloud_remote::{CatalogCache, MatchOptions, candidates, resolve};

use super::{load_settings, make_client};
use crate::error::CliError;

/// Explain how one file name would match: its key, the winning tier in each
/// collection, and the closest fuzzy candidates.
pub(crate) fn run_match(
    config: Option<PathBuf>,
    system: System,
    file: &str,
    limit: usize,
    cutoff: f64,
) -> Result<(), CliError> {
    let settings = load_settings(config.as_deref())?.settings;
    let client = make_client(&settings)?;
    let mut cache = CatalogCache::new();
    let options = MatchOptions {
        fuzzy: settings.fuzzy,
    };

    let key = normalize_key(file);
    log::info!("{}", file.if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  System: {} [{}]",
        system,
        system.tag().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Key:    \"{}\"", key);
    log::info!(
        "  Exact cover name: {}.png",
        thumbnail_safe_name(strip_extension(file))
    );

    if key.is_empty() {
        log::warn!("Nothing left to match after normalization");
        return Ok(());
    }

    let mut matched = false;
    for collection in system.thumbnail_collections() {
        log::info!("");
        let Some(catalog) = cache.get_or_fetch(&client, collection) else {
            log::info!(
                "{} {}",
                collection.if_supports_color(Stdout, |t| t.bold()),
                "(listing unavailable)".if_supports_color(Stdout, |t| t.red()),
            );
            continue;
        };
        log::info!(
            "{} {}",
            collection.if_supports_color(Stdout, |t| t.bold()),
            format!("({} covers)", catalog.len()).if_supports_color(Stdout, |t| t.dimmed()),
        );

        match resolve(&key, catalog, options) {
            Some(found) => {
                log::info!(
                    "  {} {} {}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    found.file_name,
                    format!("({}, {:.2})", found.tier, found.score)
                        .if_supports_color(Stdout, |t| t.dimmed()),
                );
                if !matched {
                    log::info!("    This cover would be used.");
                    matched = true;
                }
            }
            None => log::info!(
                "  {} no match",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            ),
        }

        for candidate in candidates(&key, catalog, limit, cutoff) {
            log::info!(
                "    {:.2}  {}",
                candidate.score,
                candidate.file_name.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }

    if !matched {
        log::info!("");
        log::warn!("No cover found; the placeholder would be used");
    }
    Ok(())
}
