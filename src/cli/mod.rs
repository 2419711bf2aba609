//! CLI subcommand implementations for the namewatch binary.

pub mod serve_cmd;
pub mod watch_cmd;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the long-running commands.
///
/// `RUST_LOG` wins when set; otherwise the verbosity flags pick the
/// default level for this crate.
pub fn init_tracing(verbose: bool, quiet: bool) {
    let default_directive = if quiet {
        "namewatch=error"
    } else if verbose {
        "namewatch=debug"
    } else {
        "namewatch=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
