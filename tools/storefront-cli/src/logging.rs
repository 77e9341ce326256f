//! Diagnostic logging.
//!
//! Library events go to stderr through `tracing`. User-facing messages use
//! [`crate::output::Output`] instead.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
/// `--json` switches to one JSON object per line.
pub fn init(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed (e.g. in tests).
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
