//! Tracing subscriber setup shared by the binaries.
//!
//! Logs go to stderr so they never interleave with menu output or the JSON
//! report on stdout. Filtering follows `SABER11_LOG` (an `EnvFilter`
//! directive such as `saber11=debug`) and defaults to `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SABER11_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber; later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    init_tracing_with_filter(filter);
}

/// Install the global subscriber with an explicit filter (tests, embedding).
pub fn init_tracing_with_filter(filter: impl Into<EnvFilter>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_harmless() {
        init_tracing_with_filter("saber11=debug");
        init_tracing();
        tracing::debug!("subscriber installed");
    }
}
