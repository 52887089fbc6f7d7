//! Telemetry helpers for applications embedding `fxchart`.
//!
//! Tracing setup stays explicit and opt-in. Hosts either call
//! `init_default_tracing` or wire their own `tracing` subscriber.

use std::time::{Duration, Instant};

use tracing::debug;

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Wall-clock timer for one render pass of one pane.
///
/// Reports at `debug` level under the `fxchart::render` target when finished
/// or dropped, whichever comes first.
#[derive(Debug)]
pub struct RenderTimer {
    pane: usize,
    started: Instant,
    reported: bool,
}

impl RenderTimer {
    #[must_use]
    pub fn start(pane: usize) -> Self {
        Self {
            pane,
            started: Instant::now(),
            reported: false,
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Reports the elapsed time and returns it.
    pub fn finish(mut self) -> Duration {
        self.report()
    }

    fn report(&mut self) -> Duration {
        let elapsed = self.elapsed();
        if !self.reported {
            self.reported = true;
            debug!(
                target: "fxchart::render",
                pane = self.pane,
                elapsed_ms = elapsed.as_secs_f64() * 1_000.0,
                "render.chart"
            );
        }
        elapsed
    }
}

impl Drop for RenderTimer {
    fn drop(&mut self) {
        self.report();
    }
}
