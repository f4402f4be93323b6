use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_cloud_lib::Settings;
use retro_cloud_lib::settings::{find_settings_file, user_settings_path};
use retro_cloud_remote::client::TOKEN_ENV;

use super::load_settings;
use crate::error::CliError;

/// Show the effective settings and their source.
pub(crate) fn run_config_show(config: Option<PathBuf>) -> Result<(), CliError> {
    let loaded = load_settings(config.as_deref())?;

    log::info!(
        "{}",
        "retro-cloud Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    match &loaded.path {
        Some(p) => log::info!(
            "  Settings file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(loaded)".if_supports_color(Stdout, |t| t.green()),
        ),
        None => log::info!(
            "  Settings file: {}",
            "none found, using defaults".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
    let token = if std::env::var(TOKEN_ENV).is_ok_and(|t| !t.is_empty()) {
        "set".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "not set".if_supports_color(Stdout, |t| t.dimmed()).to_string()
    };
    log::info!("  {TOKEN_ENV}: {token}");
    log::info!("");

    for line in loaded.settings.to_toml()?.lines() {
        log::info!("  {line}");
    }
    Ok(())
}

/// Print the settings file in use, or where `config init` would write one.
pub(crate) fn run_config_path(config: Option<PathBuf>) {
    match find_settings_file(config.as_deref()) {
        Some(path) => log::info!("{}", path.display()),
        None => {
            log::info!("{}", user_settings_path().display());
            log::warn!("File does not exist yet; create it with 'retro-cloud config init'");
        }
    }
}

/// Write the default settings to `--config` or the per-user location.
pub(crate) fn run_config_init(config: Option<PathBuf>, force: bool) -> Result<(), CliError> {
    let path = config.unwrap_or_else(user_settings_path);
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Settings::default().save(&path)?;
    log::info!(
        "{} Wrote default settings to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
