use tracing_subscriber::EnvFilter;

use crate::config::CONFIG;

/// Install the global tracing subscriber used as the diagnostic channel.
///
/// The filter comes from `LOG_LEVEL` (or `RUST_LOG` via the env filter
/// syntax). Calling this more than once is harmless.
pub fn init() {
    let filter =
        EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
