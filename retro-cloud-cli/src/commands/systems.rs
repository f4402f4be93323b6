use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_cloud_core::{System, extensions_for};

pub(crate) fn run_systems() {
    log::info!("Supported systems:");
    log::info!("");

    for &system in System::all() {
        log::info!(
            "  {} [{}] core: {}",
            system.if_supports_color(Stdout, |t| t.bold()),
            system.tag().if_supports_color(Stdout, |t| t.cyan()),
            system.core(),
        );
        log::info!("    Extensions: {}", extensions_for(system).join(", "));
        log::info!("    Folder names: {}", system.aliases().join(", "));
    }
}
