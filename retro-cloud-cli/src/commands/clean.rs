use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_cloud_lib::{MIN_ASSET_SIZE, purge_corrupt_assets};

use super::load_settings;
use crate::error::CliError;

/// Remove cover images too small to be real images.
pub(crate) fn run_clean(
    config: Option<PathBuf>,
    asset_dir: Option<PathBuf>,
    dry_run: bool,
) -> Result<(), CliError> {
    let asset_dir = match asset_dir {
        Some(dir) => dir,
        None => load_settings(config.as_deref())?.settings.asset_dir,
    };

    let report = purge_corrupt_assets(&asset_dir, MIN_ASSET_SIZE, dry_run)?;

    let verb = if dry_run { "would be removed" } else { "removed" };
    log::info!(
        "{} Checked {} image(s) in {}: {} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.scanned,
        asset_dir.display().if_supports_color(Stdout, |t| t.cyan()),
        report.removed.len(),
        verb,
    );
    for (path, reason) in &report.failed {
        log::warn!("Could not remove {}: {}", path.display(), reason);
    }
    Ok(())
}
