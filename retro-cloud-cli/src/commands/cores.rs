use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_cloud_lib::Manifest;
use retro_cloud_remote::{CoreStatus, fetch_core};

use super::{load_settings, make_client, spinner};
use crate::error::CliError;

/// Make sure every core referenced by the manifest is on disk.
pub(crate) fn run_cores(
    config: Option<PathBuf>,
    manifest: Option<PathBuf>,
    cores_dir: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let settings = load_settings(config.as_deref())?.settings;
    let manifest_path = manifest.unwrap_or_else(|| settings.output.clone());
    let cores_dir = cores_dir.unwrap_or_else(|| settings.cores_dir.clone());

    if !manifest_path.exists() {
        return Err(CliError::config(format!(
            "no manifest at {}; run 'retro-cloud scan' first",
            manifest_path.display()
        )));
    }
    let manifest = Manifest::load(&manifest_path)?;
    let cores = manifest.cores();
    if cores.is_empty() {
        log::warn!("Manifest lists no games");
        return Ok(());
    }

    let client = make_client(&settings)?;
    log::info!(
        "Checking {} core(s) in {}",
        cores.len(),
        cores_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    let mut missing = 0usize;
    for core in cores {
        let sp = spinner(&format!("{core}..."), quiet);
        let status = fetch_core(&client, core, &cores_dir)?;
        sp.finish_and_clear();
        match status {
            CoreStatus::Present(file) => log::info!(
                "  {} {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                core.if_supports_color(Stdout, |t| t.bold()),
                format!("({file} present)").if_supports_color(Stdout, |t| t.dimmed()),
            ),
            CoreStatus::Downloaded { file_name, bytes } => log::info!(
                "  {} {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                core.if_supports_color(Stdout, |t| t.bold()),
                format!("(downloaded {file_name}, {bytes} bytes)")
                    .if_supports_color(Stdout, |t| t.dimmed()),
            ),
            CoreStatus::Missing => {
                missing += 1;
                log::info!(
                    "  {} {} {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    core.if_supports_color(Stdout, |t| t.bold()),
                    "(not available)".if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }

    if missing > 0 {
        log::warn!("{missing} core(s) could not be downloaded");
    }
    Ok(())
}
