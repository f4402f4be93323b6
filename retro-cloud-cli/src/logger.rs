//! Console logging on top of `env_logger`.
//!
//! Normal runs print bare messages so command output reads like plain
//! `println!`. `--verbose` adds timestamps, levels and targets. With
//! `--logfile`, every line is also appended to the file with ANSI codes
//! removed.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Crates that log too much at debug level to be useful here.
const NOISY_MODULES: &[&str] = &["reqwest", "hyper", "hyper_util", "rustls", "h2"];

/// Writes every line to stdout and, when configured, to a log file.
struct TeeWriter {
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Level for the workspace's own crates.
fn base_level(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` directives override the defaults.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let file = logfile
        .map(|path| OpenOptions::new().create(true).append(true).open(path))
        .transpose()?;

    let mut builder = Builder::new();
    builder.filter_level(base_level(quiet, verbose));
    for module in NOISY_MODULES {
        builder.filter_module(module, LevelFilter::Warn);
    }
    if let Ok(directives) = std::env::var("RUST_LOG") {
        builder.parse_filters(&directives);
    }

    builder.format(move |buf, record| {
        if verbose {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            match record.level() {
                Level::Error => writeln!(
                    buf,
                    "{} {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    record.args()
                ),
                Level::Warn => writeln!(
                    buf,
                    "{} {}",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                    record.args()
                ),
                _ => writeln!(buf, "{}", record.args()),
            }
        }
    });

    builder.target(Target::Pipe(Box::new(TeeWriter { file })));
    builder
        .try_init()
        .map_err(io::Error::other)
}
