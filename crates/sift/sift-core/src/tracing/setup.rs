//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the sift tracing/logging system.
///
/// Reads the `SIFT_LOG` environment variable for per-module log levels.
/// Format: `SIFT_LOG=sift_analysis::capture=debug,sift_storage=warn`
///
/// Falls back to `sift=info` if `SIFT_LOG` is not set or is invalid.
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("SIFT_LOG").unwrap_or_else(|_| EnvFilter::new("sift=info"));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
