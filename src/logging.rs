//! Logging initialization.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary. `RUST_LOG` always takes precedence over the level passed in.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

static INIT_ONCE: Once = Once::new();

/// Maps the CLI `-v` count onto a level, falling back to `configured`.
pub fn level_for(verbosity: u8, configured: &str) -> &str {
    match verbosity {
        0 => configured,
        1 => "debug",
        _ => "trace",
    }
}

/// Builds the filter directive used when `RUST_LOG` is not set.
pub fn default_directive(level: &str) -> String {
    format!("treematch={}", level)
}

/// Installs a human-readable subscriber writing to stderr.
///
/// Calling this more than once is harmless; only the first call takes effect.
pub fn init(level: &str) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
        // Another subscriber may already be installed, e.g. by a test harness.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish()
            .try_init();
    });
}
