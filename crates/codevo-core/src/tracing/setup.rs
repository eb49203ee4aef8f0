//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the codevo tracing/logging system.
///
/// Reads the `CODEVO_LOG` environment variable for per-module log levels.
/// Format: `CODEVO_LOG=codevo_sim::actions=debug,codevo_sim::engine=info`
///
/// Falls back to `codevo=info` if `CODEVO_LOG` is not set or is invalid.
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("codevo=info"));

        // A subscriber installed by the host application wins.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
