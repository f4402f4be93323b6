use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_cloud_lib::{
    BuildEvent, BuildOptions, ImageSource, MIN_ASSET_SIZE, OverrideMap, build_manifest,
    purge_corrupt_assets,
};
use retro_cloud_remote::CatalogCache;

use super::{apply_library_args, display_path, load_settings, make_client, progress_bar};
use crate::cli_types::LibraryArgs;
use crate::error::CliError;

/// Flags of the `scan` command that override settings.
pub(crate) struct ScanArgs {
    pub library: LibraryArgs,
    pub output: Option<PathBuf>,
    pub web_root: Option<PathBuf>,
    pub override_file: Option<PathBuf>,
    pub no_remote: bool,
    pub link_remote: bool,
    pub no_checksums: bool,
    pub no_clean: bool,
}

fn source_label(source: ImageSource) -> &'static str {
    match source {
        ImageSource::Override => "mapped",
        ImageSource::Local => "local",
        ImageSource::Downloaded => "downloaded",
        ImageSource::Linked => "linked",
        ImageSource::Placeholder => "placeholder",
    }
}

/// Clean the cover store, then build and write the manifest.
pub(crate) fn run_scan(
    config: Option<PathBuf>,
    args: ScanArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let mut settings = load_settings(config.as_deref())?.settings;
    apply_library_args(&mut settings, &args.library);
    if let Some(output) = args.output {
        settings.output = output;
    }
    if let Some(web_root) = args.web_root {
        settings.web_root = web_root;
    }
    if let Some(override_file) = args.override_file {
        settings.override_file = override_file;
    }
    if args.no_remote {
        settings.resolve_remote = false;
    }
    if args.link_remote {
        settings.link_remote = true;
    }
    if args.no_checksums {
        settings.checksums = false;
    }

    log::info!(
        "Scanning ROMs in: {}",
        settings.rom_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    if !args.no_clean {
        let purged = purge_corrupt_assets(&settings.asset_dir, MIN_ASSET_SIZE, false)?;
        if !purged.removed.is_empty() {
            log::info!(
                "Removed {} corrupt cover(s) from {}",
                purged.removed.len(),
                settings.asset_dir.display(),
            );
        }
    }

    let overrides = OverrideMap::load(&settings.override_file)?;
    let client = make_client(&settings)?;
    let mut cache = CatalogCache::new();

    let mut options = BuildOptions::from_settings(&settings);
    options.systems = args.library.systems;

    let pb = progress_bar(0, quiet);
    let mut on_event = |event: BuildEvent| match event {
        BuildEvent::Scanning => pb.set_message("walking ROM tree"),
        BuildEvent::ScanComplete { total, skipped } => {
            pb.set_length(total as u64);
            if skipped > 0 {
                log::debug!("{skipped} file(s) with unknown extensions skipped");
            }
        }
        BuildEvent::EntryStarted { file, .. } => pb.set_message(file),
        BuildEvent::Resolving { file, .. } => pb.set_message(format!("{file} (searching covers)")),
        BuildEvent::EntryCompleted { file, source, .. } => {
            log::debug!("{file}: {}", source_label(source));
            pb.inc(1);
        }
        BuildEvent::ImageFailed { file, reason, .. } => {
            pb.suspend(|| log::debug!("{file}: {reason}"));
        }
        BuildEvent::Written { .. } | BuildEvent::Done => pb.finish_and_clear(),
    };

    let result = build_manifest(&options, &client, &mut cache, &overrides, &mut on_event)?;
    pb.finish_and_clear();
    let report = result.report;

    log::info!("");
    match &report.written {
        Some(path) => log::info!(
            "{} Wrote {} game(s) to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            report.entries,
            display_path(path).display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        None => log::warn!("No manifest written"),
    }

    let covers = [
        ("mapped", report.overrides),
        ("local", report.local),
        ("downloaded", report.downloaded),
        ("linked", report.linked),
        ("placeholder", report.placeholders),
    ];
    let summary: Vec<String> = covers
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(label, n)| format!("{n} {label}"))
        .collect();
    if !summary.is_empty() {
        log::info!(
            "  Covers: {}",
            summary.join(", ").if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    if report.failures > 0 {
        log::warn!("{} cover download(s) failed", report.failures);
    }
    if report.filtered > 0 {
        log::info!("  {} game(s) outside the selected systems", report.filtered);
    }
    if report.skipped > 0 {
        log::info!("  {} unrecognized file(s) ignored", report.skipped);
    }
    if cache.requests() > 0 {
        log::debug!("{} cover list request(s)", cache.requests());
    }

    Ok(())
}
