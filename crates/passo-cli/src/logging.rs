//! Diagnostic logging setup.
//!
//! Core events go through `tracing`. They are written to stderr so that
//! stdout stays clean for tables and JSON. Core warnings are hidden by
//! default because the gateway already reports them as notices.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "passo_cli=warn,passo_core=error";
const VERBOSE_FILTER: &str = "passo_cli=debug,passo_core=debug,warn";

/// Install the global subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // Keep an already-installed subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .try_init();
}
