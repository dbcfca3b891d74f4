//! Optional `tracing` subscriber setup for hosts embedding `canvas-charts`.
//!
//! Events emitted by the crate:
//! - `debug`: chart created, replaced, updated, destroyed, kind changed;
//!   constant line data (degenerate value range); bar charts without positive
//!   values.
//! - `trace`: every completed render, with dataset and label counts.
//! - `warn`: rejected updates, failed chart replacements, ignored padding and
//!   malformed cutout options.
//! - `error`: failures swallowed by `FailSoft::or_log`.
//!
//! Every lifecycle event carries a `surface_id` field.

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "canvas_charts=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is off or the host already set
/// a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::init_default_tracing;

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn disabled_feature_installs_nothing() {
        assert!(!init_default_tracing());
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn second_install_is_refused() {
        let _ = init_default_tracing();
        assert!(!init_default_tracing());
    }
}
