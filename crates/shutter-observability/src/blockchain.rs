use std::time::Duration;

use metrics::{counter, gauge, histogram};

pub fn record_blockchain_event_logs_batch(
    status: &str,
    duration: Duration,
    block_span: u64,
    logs: usize,
) {
    counter!(
        "node_blockchain_event_logs_batch_total",
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "node_blockchain_event_logs_batch_duration_seconds",
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());
    histogram!(
        "node_blockchain_event_logs_batch_blocks",
        "status" => status.to_string()
    )
    .record(block_span as f64);
    histogram!(
        "node_blockchain_event_logs_batch_logs",
        "status" => status.to_string()
    )
    .record(logs as f64);
}

pub fn record_blockchain_address_set_query(set: &str, status: &str, duration: Duration) {
    counter!(
        "node_blockchain_address_set_query_total",
        "set" => set.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "node_blockchain_address_set_query_duration_seconds",
        "set" => set.to_string(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());
}

pub fn record_blockchain_finalized_head(block_number: u64) {
    gauge!("node_blockchain_finalized_head").set(block_number as f64);
}
