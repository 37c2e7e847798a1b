//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "BURROW_LOG";

/// Initialize the burrow tracing/logging system.
///
/// Reads `BURROW_LOG` for per-module log levels, e.g.
/// `BURROW_LOG=burrow_scan=debug,burrow_core=warn`.
///
/// Falls back to `burrow=info` if `BURROW_LOG` is not set or is invalid.
/// Calling it more than once is a no-op. If the host application already
/// installed a global subscriber, that subscriber is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("burrow=info"));

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
