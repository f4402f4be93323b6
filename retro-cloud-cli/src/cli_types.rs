//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use retro_cloud_core::System;

#[derive(Parser)]
#[command(name = "retro-cloud")]
#[command(about = "Build the game catalog for a browser emulator front end", long_about = None)]
pub(crate) struct Cli {
    /// Settings file (default: ./retro-cloud.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where ROMs and covers live. Overrides the settings file.
#[derive(Args, Clone, Default)]
pub(crate) struct LibraryArgs {
    /// Root of the ROM tree
    #[arg(long)]
    pub rom_dir: Option<PathBuf>,

    /// Cover store (one folder per system)
    #[arg(long)]
    pub asset_dir: Option<PathBuf>,

    /// Systems to include (e.g., nes,snes,psx,neogeo)
    #[arg(short, long, value_delimiter = ',')]
    pub systems: Option<Vec<System>>,

    /// Only accept exact name matches
    #[arg(long)]
    pub no_fuzzy: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan the ROM tree and write the manifest
    Scan {
        #[command(flatten)]
        library: LibraryArgs,

        /// Manifest output path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory the manifest paths are relative to
        #[arg(long)]
        web_root: Option<PathBuf>,

        /// Cover override map (JSON object of raw name to image)
        #[arg(long)]
        override_file: Option<PathBuf>,

        /// Do not query the thumbnail repositories
        #[arg(long)]
        no_remote: bool,

        /// Emit remote cover URLs instead of downloading covers
        #[arg(long, conflicts_with = "no_remote")]
        link_remote: bool,

        /// Skip CRC32 computation
        #[arg(long)]
        no_checksums: bool,

        /// Skip the corrupt-cover cleanup before scanning
        #[arg(long)]
        no_clean: bool,
    },

    /// Download missing covers without writing a manifest
    Covers {
        #[command(flatten)]
        library: LibraryArgs,
    },

    /// Delete corrupt (tiny) cover images
    Clean {
        /// Cover store to clean
        #[arg(long)]
        asset_dir: Option<PathBuf>,

        /// List what would be deleted without deleting
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Download the emulator cores a manifest needs
    Cores {
        /// Manifest to read (default: the configured output)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Where to store the cores
        #[arg(long)]
        cores_dir: Option<PathBuf>,
    },

    /// Show how a file name matches against a system's thumbnail collections
    Match {
        /// System name or alias
        system: System,

        /// ROM file name, e.g. "Last Blade, The (UE) [!].npc"
        file: String,

        /// Number of fuzzy candidates to show
        #[arg(short = 'n', long, default_value_t = 5)]
        limit: usize,

        /// Minimum similarity for a candidate
        #[arg(long, default_value_t = 0.1)]
        cutoff: f64,
    },

    /// List all supported systems
    Systems,

    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the effective settings and where they came from
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_system_filter_aliases() {
        let cli = Cli::try_parse_from(["retro-cloud", "scan", "--systems", "psx,genesis,nes"]).unwrap();
        let Commands::Scan { library, .. } = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(
            library.systems,
            Some(vec![System::Ps1, System::MegaDrive, System::Nes])
        );
    }

    #[test]
    fn unknown_system_is_rejected() {
        assert!(Cli::try_parse_from(["retro-cloud", "match", "dreamcast", "x.gdi"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["retro-cloud", "clean", "-n", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Clean { dry_run: true, .. }));
    }

    #[test]
    fn link_and_no_remote_conflict() {
        assert!(Cli::try_parse_from(["retro-cloud", "scan", "--no-remote", "--link-remote"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
