//! Tracing subscriber setup for binaries, demos and benches.

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "warn";

/// Install a global fmt subscriber.
///
/// The filter comes from `filter`, else `RUST_LOG`, else `warn`. Output goes
/// to stderr so derived material printed on stdout stays clean. Calling this
/// more than once leaves the first subscriber in place.
pub fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
