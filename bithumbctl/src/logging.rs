//! Log filter setup.

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_LOG_FILTER: &str = "bithumbctl=info,bithumb_connectors=info";

/// Filter from `RUST_LOG` if it holds valid directives, otherwise the default.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
