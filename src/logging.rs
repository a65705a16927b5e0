//! Logging setup
//!
//! `RUST_LOG` controls verbosity; the default is `info`.

use env_logger::Env;

/// Initialise the global logger. Safe to call more than once.
pub fn setup_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
