//! Tracing setup for binaries and tests that embed the engine.
//!
//! The library itself only emits `tracing` events; nothing is printed until a
//! subscriber is installed.

use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity level (`-v` count)
pub fn level_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `verbose` when set. Calling this again
/// after a subscriber exists is a no-op.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_filter(verbose)));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
    {
        tracing::debug!("Logging initialized at verbosity {}", verbose);
    }
}
