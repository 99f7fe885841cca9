//! Telemetry helpers for applications embedding `rct-chart`.
//!
//! Marks only emit `tracing` events (`warn!` on rejected props, `debug!` per
//! rendered document, `trace!` per mark geometry). Installing a subscriber is
//! left to the host; the helpers here are for binaries and demos.

/// Filter used when `RUST_LOG` is unset: this crate at `info`, everything else off.
pub const DEFAULT_LOG_FILTER: &str = "rct_chart=info";

/// Installs a compact stderr subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or the host already
/// set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_LOG_FILTER)
}

/// Like [`init_default_tracing`] with a caller-chosen fallback filter, e.g.
/// `"rct_chart=trace"` to log every mark's geometry.
#[must_use]
pub fn init_tracing(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
