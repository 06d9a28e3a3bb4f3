use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

/// Installs a stderr subscriber.
///
/// `verbose` forces the `debug` level. Otherwise `RUST_LOG` is honoured and
/// the level falls back to `warn`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber installed by an embedding program wins.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
