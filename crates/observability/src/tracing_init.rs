//! Process-wide log setup.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Emits JSON lines. Verbosity comes from `RUST_LOG`, falling back to
/// `info`. Calling this more than once is harmless; later installs are
/// ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .try_init();
}
