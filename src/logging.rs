use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set. Safe to call more than
/// once: later calls are ignored.
pub fn init(default_filter: &str) {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
