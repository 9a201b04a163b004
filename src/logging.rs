//! Logging configuration for IntelliSQL.
//!
//! Logs go to stderr so that stdout only carries generated SQL and result
//! tables. `RUST_LOG` always wins over the built-in default level.

use tracing_subscriber::EnvFilter;

/// Returns the filter directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "intellisql=debug,info"
    } else {
        "warn"
    }
}

/// Initializes logging to stderr.
pub fn init_stderr_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
