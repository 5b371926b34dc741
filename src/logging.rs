//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Reads `GATECHECK_LOG` (e.g. `GATECHECK_LOG=gatecheck=debug`), falling back
/// to `gatecheck=info`. Logs go to stderr so `--json` stdout stays a single
/// document.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("GATECHECK_LOG")
            .unwrap_or_else(|_| EnvFilter::new("gatecheck=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .with(filter)
            .init();
    });
}
