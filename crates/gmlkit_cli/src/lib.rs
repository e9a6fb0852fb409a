//! `gmlkit_cli`: the `gml2txt` front-end (arguments, prompts, run summary).

pub mod cli;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
