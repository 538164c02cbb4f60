//! Logging setup utilities for the Skydesk binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the calling binary and every `skydesk_*` library crate,
/// so a single `RUST_LOG` value controls the whole process. When `RUST_LOG`
/// is unset or invalid, `default_log_level` is applied.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "skydesk_server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use skydesk_shared::logger::setup_logger;
///
/// setup_logger("skydesk_server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "skydesk_shared={level},skydesk_server={level},skydesk_client={level},{bin}={level}",
        level = default_log_level,
        bin = binary_name.replace('-', "_"),
    )
}
