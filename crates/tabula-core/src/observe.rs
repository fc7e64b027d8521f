//! Optional metrics instrumentation for Tabula.
//!
//! When the `observe` feature is enabled, store operations emit counters and
//! histograms via the [`metrics`] crate. A downstream application must install
//! a metrics recorder to collect the data.
//!
//! When the feature is **not** enabled every function in this module is a
//! zero-cost no-op.

/// Record one store operation (counter + latency histogram).
///
/// - `tabula.operation.total` – counter with `op` and `outcome` labels
/// - `tabula.operation.duration_seconds` – histogram with an `op` label
#[inline]
pub fn record_operation(op: &'static str, duration: std::time::Duration, success: bool) {
    #[cfg(feature = "observe")]
    {
        let outcome = if success { "ok" } else { "fail" };
        metrics::counter!("tabula.operation.total", "op" => op, "outcome" => outcome).increment(1);
        metrics::histogram!("tabula.operation.duration_seconds", "op" => op)
            .record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (op, duration, success);
    }
}

/// Record how many values a duplicate walk returned.
///
/// - `tabula.duplicates.values_total` – counter
#[inline]
pub fn record_duplicates(count: usize) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("tabula.duplicates.values_total").increment(count as u64);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = count;
    }
}

/// Record a store open or close.
///
/// - `tabula.store.lifecycle_total` – counter with an `event` label
#[inline]
pub fn record_lifecycle(event: &'static str) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("tabula.store.lifecycle_total", "event" => event).increment(1);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = event;
    }
}
