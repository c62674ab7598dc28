//! Tracing setup for the binary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, filter::Targets, fmt, prelude::*};

const APP_TARGET: &str = "remit";

/// Level for the crate's own events.
fn app_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    }
}

/// `RUST_LOG` wins over the verbose flag when it is set.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(app_level(verbose).into()))
}

/// Installs the global subscriber. Output goes to stderr so it never mixes
/// with the wizard prompts on stdout.
pub fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(Targets::new().with_target(APP_TARGET, app_level(verbose)))
        .with(env_filter(verbose))
        .init();
}
