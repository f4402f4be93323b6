use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_cloud_lib::{CoverEvent, CoverOptions, download_covers};
use retro_cloud_remote::CatalogCache;

use super::{apply_library_args, load_settings, make_client, progress_bar};
use crate::cli_types::LibraryArgs;
use crate::error::CliError;

/// Download covers for ROMs that have none, without touching the manifest.
pub(crate) fn run_covers(
    config: Option<PathBuf>,
    library: LibraryArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let mut settings = load_settings(config.as_deref())?.settings;
    apply_library_args(&mut settings, &library);

    let client = make_client(&settings)?;
    let mut cache = CatalogCache::new();
    let mut options = CoverOptions::from_settings(&settings);
    options.systems = library.systems;

    log::info!(
        "Fetching covers into: {}",
        settings.asset_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    let pb = progress_bar(0, quiet);
    let mut on_event = |event: CoverEvent| match event {
        CoverEvent::ScanComplete { total } => pb.set_length(total as u64),
        CoverEvent::Existing { .. } | CoverEvent::NotFound { .. } | CoverEvent::Failed { .. } => {
            pb.inc(1)
        }
        CoverEvent::Downloaded {
            file, remote, tier, ..
        } => {
            pb.suspend(|| {
                log::info!(
                    "  {} {} {} {} {}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    file,
                    "->".if_supports_color(Stdout, |t| t.dimmed()),
                    remote,
                    format!("({tier})").if_supports_color(Stdout, |t| t.dimmed()),
                )
            });
            pb.inc(1);
        }
        CoverEvent::Done => pb.finish_and_clear(),
    };

    let report = download_covers(&options, &client, &mut cache, &mut on_event)?;
    pb.finish_and_clear();

    log::info!("");
    log::info!(
        "{} {} game(s): {} downloaded, {} already had covers, {} not found",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.total,
        report.downloaded,
        report.existing,
        report.not_found,
    );
    if report.failed > 0 {
        log::warn!("{} download(s) failed", report.failed);
    }
    Ok(())
}
