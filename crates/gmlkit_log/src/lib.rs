//! `gmlkit_log`: tracing subscriber setup shared by gmlkit front-ends.
//!
//! Library crates only emit `tracing` events; binaries call [`init_logging`]
//! once at startup.

use std::sync::Once;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crate prefixes whose events are enabled at the requested level.
const L_CRATE_TARGETS: [&str; 3] = ["gmlkit_io_fs", "gmlkit_cli", "gml2txt"];

/// Environment variable consulted when no level is given on the command line.
pub const C_ENV_LOG_LEVEL: &str = "GMLKIT_LOG_LEVEL";

/// Map a level name (any case) to [`Level`]; unknown names fall back to INFO.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Build the filter: `RUST_LOG` wins when set, otherwise one directive per
/// gmlkit crate at `level`.
pub fn build_filter(level: Level) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    let mut filter = EnvFilter::new("warn");
    for target in L_CRATE_TARGETS {
        if let Ok(directive) = format!("{target}={}", level.as_str().to_lowercase()).parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Install the global subscriber. Later calls are no-ops.
///
/// Events are written to stdout as bare messages (no timestamp, level or
/// target) so progress lines read as plain text.
pub fn init_logging(level: Level) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(build_filter(level))
            .with(
                fmt::layer()
                    .without_time()
                    .with_level(false)
                    .with_target(false)
                    .with_writer(std::io::stdout),
            )
            .try_init();
    });
}
