//! Console tracing setup.
//!
//! Provides [`Telemetry`] for installing a `tracing-subscriber` formatter with
//! an [`EnvFilter`]. Only available with the `telemetry` feature.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when neither `RUST_LOG` nor a configured level is set.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Subscriber configuration.
#[derive(Debug, Default)]
pub struct Telemetry {
    log_level: Option<String>,
}

impl Telemetry {
    /// Creates a new, empty [`Telemetry`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level filter used when `RUST_LOG` is not set.
    ///
    /// Accepts any valid [`EnvFilter`] directive string (e.g. `"debug"`,
    /// `"eip7828=trace"`).
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Installs the global subscriber. Logs go to stderr so command output
    /// on stdout stays machine-readable.
    pub fn register(self) {
        let fallback = self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        tracing::debug!(filter = fallback, "console logging initialised");
    }
}
