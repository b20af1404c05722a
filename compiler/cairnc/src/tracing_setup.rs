//! Tracing subscriber for the CLI.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "CAIRN_LOG";

/// Install the subscriber. Safe to call more than once.
///
/// Nothing is installed unless `CAIRN_LOG` is set, e.g.
/// `CAIRN_LOG=cairn_eval=debug` or `CAIRN_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let Ok(directives) = std::env::var(LOG_ENV) else {
            return;
        };
        let filter = EnvFilter::try_new(&directives).unwrap_or_else(|err| {
            eprintln!("warning: ignoring invalid {LOG_ENV} value '{directives}': {err}");
            EnvFilter::new("warn")
        });
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_writer(std::io::stderr)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .init();
    });
}
