use std::time::Duration;

use metrics::{counter, gauge, histogram};

pub fn record_sync_event_applied(kind: &str, status: &str, duration: Duration) {
    counter!(
        "node_sync_events_applied_total",
        "kind" => kind.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "node_sync_event_apply_duration_seconds",
        "kind" => kind.to_string(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());
}

pub fn record_sync_cursor(next_block_number: u64, next_log_index: u64) {
    gauge!("node_sync_cursor_next_block_number").set(next_block_number as f64);
    gauge!("node_sync_cursor_next_log_index").set(next_log_index as f64);
}

pub fn record_sync_signature_verification(outcome: &str) {
    counter!(
        "node_sync_bls_signature_verification_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}
