//! Telemetry related to authorization checks.
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use anyhow::Result;
use once_cell::sync::Lazy;
use prometheus::Counter;
use prometheus::CounterVec;
use prometheus::Opts;

/// Total number of authorization checks, by check and decision.
pub static CHECKS: Lazy<CounterVec> = Lazy::new(|| {
    CounterVec::new(
        Opts::new(
            "venueguard_auth_checks_total",
            "Total number of authorization checks, by check and decision",
        ),
        &["check", "decision"],
    )
    .expect("failed to initialise CHECKS counter")
});

/// Number of claims lookups that failed for reasons other than unknown callers.
pub static CLAIMS_LOOKUP_ERR: Lazy<Counter> = Lazy::new(|| {
    Counter::new(
        "venueguard_auth_claims_lookup_errors_total",
        "Number of claims lookups that failed for reasons other than unknown callers",
    )
    .expect("failed to initialise CLAIMS_LOOKUP_ERR counter")
});

/// Ensure metrics are registered only once.
static METRICS_REGISTERED: AtomicBool = AtomicBool::new(false);

/// The first time this method is called it will register the authorization metrics.
pub fn register_metrics(reg: &prometheus::Registry) -> Result<()> {
    // Skip registration if already done before.
    if METRICS_REGISTERED.swap(true, Ordering::AcqRel) {
        return Ok(());
    }

    let collectors: [Box<dyn prometheus::core::Collector>; 2] = [
        Box::new(CHECKS.clone()),
        Box::new(CLAIMS_LOOKUP_ERR.clone()),
    ];
    for collector in collectors {
        reg.register(collector)?;
    }
    Ok(())
}
