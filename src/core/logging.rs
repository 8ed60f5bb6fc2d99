//! Logging setup
//!
//! Logs go to stderr with a compact timestamp so stdout stays reserved for
//! command output. `RUST_LOG` takes precedence over `--debug`:
//! ```bash
//! RUST_LOG=nomad=trace nomad geocode "Berlin"
//! ```

use std::sync::Once;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Filter directive used when `RUST_LOG` is unset
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "warn,nomad=debug"
    } else {
        "warn"
    }
}

/// Initialize logging. Only the first call takes effect.
pub fn init(debug: bool) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(default_directive(debug))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        // another subscriber may already be installed (e.g. in tests)
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}
