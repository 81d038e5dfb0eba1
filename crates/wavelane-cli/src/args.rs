//! Command-line argument definitions for the Wavelane CLI.
//!
//! [`Args`] is parsed from the command line with [`clap`] and selects the
//! input and output paths, the configuration file and the log verbosity.

use clap::Parser;

/// Command-line arguments for the Wavelane timing diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input WaveJSON file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long)]
    pub output: String,

    /// Path to configuration file (TOML)
    ///
    /// Glyph artwork is not built in: set `render.skin_defs` to a file of
    /// `<g id="...">` definitions (see `demos/skins/clock.svg`) so that the
    /// brick references resolve.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
