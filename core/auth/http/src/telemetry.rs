//! Telemetry related to claims requests sent to the identity service.
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use anyhow::Result;
use once_cell::sync::Lazy;
use prometheus::Counter;
use prometheus::Histogram;
use prometheus::HistogramOpts;

/// Duration, in seconds, of claims requests to the identity service.
pub static REQUEST_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(HistogramOpts::new(
        "venueguard_auth_http_request_duration_seconds",
        "Duration, in seconds, of claims requests to the identity service",
    ))
    .expect("failed to initialise REQUEST_DURATION histogram")
});

/// Number of claims requests to the identity service that resulted in error.
pub static REQUEST_ERR: Lazy<Counter> = Lazy::new(|| {
    Counter::new(
        "venueguard_auth_http_request_errors_total",
        "Number of claims requests to the identity service that resulted in error",
    )
    .expect("failed to initialise REQUEST_ERR counter")
});

/// Ensure metrics are registered only once.
static METRICS_REGISTERED: AtomicBool = AtomicBool::new(false);

/// The first time this method is called it will register the HTTP claims provider metrics.
pub fn register_metrics(reg: &prometheus::Registry) -> Result<()> {
    // Skip registration if already done before.
    if METRICS_REGISTERED.swap(true, Ordering::AcqRel) {
        return Ok(());
    }

    let collectors: [Box<dyn prometheus::core::Collector>; 2] = [
        Box::new(REQUEST_DURATION.clone()),
        Box::new(REQUEST_ERR.clone()),
    ];
    for collector in collectors {
        reg.register(collector)?;
    }
    Ok(())
}
