// src/infra/logger.rs — Structured logging with tracing

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber at the configured level, with
/// `RUST_LOG` taking precedence. Embedding applications own the
/// subscriber lifecycle, so a second call (or a subscriber installed
/// by the host) is a no-op rather than a panic.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
