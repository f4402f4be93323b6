//! retro-cloud CLI
//!
//! Builds the game manifest, cover store and core directory for a
//! browser-based emulator front end.

mod cli_types;
mod commands;
mod error;
mod logger;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::scan::ScanArgs;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Could not open log file: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.config;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Scan {
            library,
            output,
            web_root,
            override_file,
            no_remote,
            link_remote,
            no_checksums,
            no_clean,
        } => commands::scan::run_scan(
            config,
            ScanArgs {
                library,
                output,
                web_root,
                override_file,
                no_remote,
                link_remote,
                no_checksums,
                no_clean,
            },
            quiet,
        ),
        Commands::Covers { library } => commands::covers::run_covers(config, library, quiet),
        Commands::Clean { asset_dir, dry_run } => {
            commands::clean::run_clean(config, asset_dir, dry_run)
        }
        Commands::Cores {
            manifest,
            cores_dir,
        } => commands::cores::run_cores(config, manifest, cores_dir, quiet),
        Commands::Match {
            system,
            file,
            limit,
            cutoff,
        } => commands::lookup::run_match(config, system, &file, limit, cutoff),
        Commands::Systems => {
            commands::systems::run_systems();
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(config),
            ConfigAction::Path => {
                commands::config::run_config_path(config);
                Ok(())
            }
            ConfigAction::Init { force } => commands::config::run_config_init(config, force),
        },
    }
}
