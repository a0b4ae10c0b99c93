use std::time::Duration;

use metrics::{counter, histogram};

pub fn record_network_message_validation(topic: &str, decision: &str, duration: Duration) {
    counter!(
        "node_network_message_validation_total",
        "topic" => topic.to_string(),
        "decision" => decision.to_string()
    )
    .increment(1);
    histogram!(
        "node_network_message_validation_duration_seconds",
        "topic" => topic.to_string(),
        "decision" => decision.to_string()
    )
    .record(duration.as_secs_f64());
}

pub fn record_network_message_handled(topic: &str, status: &str) {
    counter!(
        "node_network_message_handled_total",
        "topic" => topic.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
