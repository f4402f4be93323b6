pub(crate) mod clean;
pub(crate) mod config;
pub(crate) mod cores;
pub(crate) mod covers;
pub(crate) mod lookup;
pub(crate) mod scan;
pub(crate) mod systems;

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use retro_cloud_lib::{LoadedSettings, Settings};
use retro_cloud_remote::LibretroClient;

use crate::cli_types::LibraryArgs;
use crate::error::CliError;

pub(crate) fn load_settings(config: Option<&Path>) -> Result<LoadedSettings, CliError> {
    let loaded = Settings::load(config)?;
    if loaded.path.is_none() {
        log::debug!("No settings file, using defaults");
    }
    Ok(loaded)
}

/// Apply the shared library flags on top of the loaded settings.
pub(crate) fn apply_library_args(settings: &mut Settings, args: &LibraryArgs) {
    if let Some(dir) = &args.rom_dir {
        settings.rom_dir = dir.clone();
    }
    if let Some(dir) = &args.asset_dir {
        settings.asset_dir = dir.clone();
    }
    if args.no_fuzzy {
        settings.fuzzy = false;
    }
}

pub(crate) fn make_client(settings: &Settings) -> Result<LibretroClient, CliError> {
    Ok(LibretroClient::new(settings.remote.clone())?)
}

/// Progress bar for a known number of items, hidden in quiet mode.
pub(crate) fn progress_bar(len: usize, quiet: bool) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if quiet {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    let style = ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    pb.set_style(style);
    pb
}

/// Spinner for work of unknown length.
pub(crate) fn spinner(msg: &str, quiet: bool) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if quiet {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("/-\\|");
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Path shown to the user: relative to the working directory when possible.
pub(crate) fn display_path(path: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}
