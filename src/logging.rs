//! Logging initialization
//!
//! Hosts that already install a `tracing` subscriber can skip this entirely;
//! the connector only emits events. `init()` is for standalone use and is
//! safe to call more than once.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install a stderr subscriber filtered by `RUST_LOG` (default: `warn`).
pub fn init() {
    LOGGING_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("maxdb_connector=warn"));

        // try_init: a subscriber installed by the host wins
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
