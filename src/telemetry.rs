//! Tracing setup for hosts embedding `chart-geometry`.
//!
//! Layout commits log at `debug`, scrubber and counter steps at `trace`.
//! Hosts either call `init_default_tracing` or install their own subscriber.

/// Filter used when `RUST_LOG` is unset: crate events at `info`, everything
/// else at `warn`.
pub const DEFAULT_TRACING_FILTER: &str = "warn,chart_geometry=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when the host already
/// set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACING_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .without_time()
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
