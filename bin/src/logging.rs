//! Log output for the CLI.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// Logs go to stderr so that tables printed on stdout stay clean. The level
/// comes from `RUST_LOG` (default `info`); `verbose` forces `debug`.
pub(crate) fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
