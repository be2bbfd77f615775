/*!
 * Tracing
 * Structured log output for the replay binary using the tracing crate
 *
 * Library code logs through the `log` facade; the subscriber installed here
 * picks those records up as well.
 */

use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured tracing on stderr
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SCHED_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("SCHED_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
        debug!("Structured tracing initialized");
    }
}

/// Span covering one replay run
pub struct ReplaySpan {
    span: tracing::Span,
    start: Instant,
}

impl ReplaySpan {
    pub fn new(source: &str, events: usize) -> Self {
        let span = span!(
            Level::INFO,
            "replay",
            source = source,
            events = events,
            applied = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
        }
    }

    /// Record how many events were applied before the run ended
    pub fn record_applied(&self, applied: usize) {
        self.span.record("applied", applied);
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for ReplaySpan {
    fn drop(&mut self) {
        self.span
            .record("duration_us", self.start.elapsed().as_micros() as u64);
    }
}

/// Helper to create a replay span
#[inline]
pub fn span_replay(source: &str, events: usize) -> ReplaySpan {
    ReplaySpan::new(source, events)
}
