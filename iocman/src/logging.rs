//! Subscriber setup for the library crates' `tracing` events.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_DIRECTIVES: &str = "warn,iocman=debug,iocman_codegen=debug,iocman_config=debug,\
                                  iocman_core=debug,iocman_project=debug";

/// Install the global subscriber. Events go to stderr so reports on
/// stdout stay machine readable.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug output for
/// the iocman crates and warnings are shown by default.
pub fn init(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new(VERBOSE_DIRECTIVES),
        Err(_) => EnvFilter::new("warn"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(verbose).with_writer(std::io::stderr))
        .init();
}
