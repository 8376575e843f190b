//! Logging setup utilities for Minimum Instant Messenger.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Logs are filtered for the library crate and the binary. The log level can
/// be overridden using the `RUST_LOG` environment variable. Output goes to
/// stderr so that it does not interleave with the interactive prompt on stdout.
///
/// # Arguments
///
/// * `crate_name` - The name of the library crate that emits the logs (e.g., "mim_client")
/// * `binary_name` - The name of the binary (e.g., "mim-client")
/// * `default_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use mim_shared::logger::setup_logger;
///
/// setup_logger("mim_client", "mim-client", "info");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_directives(crate_name, binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build the `EnvFilter` directives used when `RUST_LOG` is not set.
fn default_directives(crate_name: &str, binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={}",
        crate_name.replace("-", "_"),
        default_log_level,
        binary_name.replace("-", "_"),
        default_log_level
    )
}
