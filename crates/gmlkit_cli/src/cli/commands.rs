use std::env;
use std::path::PathBuf;

use clap::Parser;
use gmlkit_log::{C_ENV_LOG_LEVEL, parse_level};
use tracing::Level;

/// Copy every .gml file of a tree into one flat directory as .txt
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gml2txt",
    version,
    about = "Copy every .gml file of a tree into one flat directory as .txt",
    long_about = "gml2txt scans SOURCE recursively for .gml files (any case), copies each \
                  one directly into OUTPUT with a .txt extension, and appends _1, _2, ... \
                  when a name is already taken. Missing paths are asked for interactively.\n\n\
                  Examples:\n  \
                  gml2txt\n  \
                  gml2txt ./maps ./flat\n  \
                  gml2txt ./maps ./flat --quiet"
)]
pub struct CliArgs {
    #[arg(value_name = "SOURCE", help = "Directory scanned recursively for .gml files")]
    pub source: Option<PathBuf>,

    #[arg(value_name = "OUTPUT", help = "Flat directory receiving the .txt copies")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Log skipped entries and other debug detail")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only errors and the final tally"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// Flag precedence: `--log-level`, `-v`, `-q`, then the environment.
    pub fn resolve_log_level(&self) -> Level {
        if let Some(level_str) = &self.log_level {
            parse_level(level_str)
        } else if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::ERROR
        } else {
            let level_str = env::var(C_ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string());
            parse_level(&level_str)
        }
    }
}
