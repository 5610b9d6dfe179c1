//! Prometheus counters for the HTTP API.
//!
//! Counters are no-ops until a recorder is installed (see `plantscan serve
//! --metrics-port`).

use metrics::counter;

/// Count a request to a named API route.
pub(crate) fn record_request(route: &'static str) {
    counter!("plantscan_requests_total", "route" => route).increment(1);
}

/// Count a completed analysis by diagnosis label.
pub(crate) fn record_analysis(label: &str) {
    counter!("plantscan_analyses_total", "label" => label.to_string()).increment(1);
}

/// Count a failed record store operation.
pub(crate) fn record_store_error(op: &'static str) {
    counter!("plantscan_store_errors_total", "op" => op).increment(1);
}
