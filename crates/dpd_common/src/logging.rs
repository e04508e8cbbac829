//! Logging setup for the DPD client and backend.
//!
//! Library code only emits `tracing` events; binaries call [`init`] or
//! [`init_with_level`] once to install a subscriber.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use dpd_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level for the `dpd` crates.
///
/// A non-empty `RUST_LOG` replaces the level entirely. Calling this twice is
/// harmless: the second call finds a global subscriber already set and does
/// nothing.
pub fn init_with_level(level: Level) {
    let filter = build_filter(level, std::env::var("RUST_LOG").ok().as_deref());

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

const DPD_TARGETS: [&str; 5] = [
    "dpd_common",
    "dpd_auth",
    "dpd_parcel_status",
    "dpd_shipment",
    "dpd_backend",
];

/// Everything else stays at WARN unless `rust_log` says otherwise.
fn build_filter(level: Level, rust_log: Option<&str>) -> EnvFilter {
    match rust_log.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => {
            let directives: Vec<String> = DPD_TARGETS
                .iter()
                .map(|target| format!("{}={}", target, level))
                .collect();
            EnvFilter::new(format!("warn,{}", directives.join(",")))
        }
    }
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
