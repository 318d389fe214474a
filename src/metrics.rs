//! Metrics helpers
//!
//! Thin wrappers over the `metrics` macros so call sites stay one-liners.
//! A host that installs no recorder pays only the no-op cost.

/// Counter helpers
pub mod counters {
    use metrics::counter;

    pub fn connect_attempted() {
        counter!("maxdb_connect_attempts_total").increment(1);
    }

    pub fn connect_completed(status: &'static str) {
        counter!("maxdb_connects_total", "status" => status).increment(1);
    }

    pub fn query_completed(status: &'static str) {
        counter!("maxdb_queries_total", "status" => status).increment(1);
    }

    pub fn health_check(status: &'static str) {
        counter!("maxdb_health_checks_total", "status" => status).increment(1);
    }
}

/// Histogram helpers
pub mod histograms {
    use metrics::histogram;

    pub fn query_duration(millis: u64) {
        histogram!("maxdb_query_duration_ms").record(millis as f64);
    }

    pub fn connect_duration(millis: u64) {
        histogram!("maxdb_connect_duration_ms").record(millis as f64);
    }
}

/// Shared label values
pub mod labels {
    pub const STATUS_SUCCESS: &str = "success";
    pub const STATUS_ERROR: &str = "error";
}
