use std::io;

use clap::Parser;
use gmlkit_cli::cli::commands::CliArgs;
use gmlkit_cli::cli::convert::run_convert;
use gmlkit_cli::{NAME, VERSION};
use tracing::{debug, error};

fn main() {
    let args = CliArgs::parse();
    gmlkit_log::init_logging(args.resolve_log_level());

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();

    match run_convert(&args, &mut reader, &mut writer) {
        Ok(outcome) => debug!("Run finished: {outcome:?}"),
        Err(e) => error!("Error: {e:#}"),
    }
}
