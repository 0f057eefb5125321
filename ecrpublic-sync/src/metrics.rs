//! Remote API call counters.
//!
//! Recorded through the `metrics` facade; the embedding process installs
//! whatever exporter it wants. Without one, recording is a no-op.

use ::metrics::counter;

/// Metric names as constants for consistency.
pub mod names {
    pub const API_CALLS_TOTAL: &str = "ecrpublic_api_calls_total";
}

/// Operation kind of a call that changes remote state.
pub const OP_UPDATE: &str = "UPDATE";
/// Operation kind of a read-only call.
pub const OP_GET: &str = "GET";

/// Count one remote call with its kind, name and outcome (`ok` / `error`).
pub fn record_api_call(op_type: &'static str, operation: &'static str, succeeded: bool) {
    let outcome = if succeeded { "ok" } else { "error" };
    counter!(
        names::API_CALLS_TOTAL,
        "op_type" => op_type,
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}


#[cfg(test)]
mod tests {
    use super::testing::capture_counters;
    use super::*;

    fn labels(op_type: &str, operation: &str, outcome: &str) -> Vec<(String, String)> {
        vec![
            ("op_type".to_string(), op_type.to_string()),
            ("operation".to_string(), operation.to_string()),
            ("outcome".to_string(), outcome.to_string()),
        ]
    }

    #[test]
    fn counts_calls_per_operation_and_outcome() {
        let counters = capture_counters(|| {
            record_api_call(OP_UPDATE, "TagResource", true);
            record_api_call(OP_UPDATE, "TagResource", true);
            record_api_call(OP_GET, "ListTagsForResource", false);
        });

        assert_eq!(
            counters,
            vec![
                (labels("GET", "ListTagsForResource", "error"), 1),
                (labels("UPDATE", "TagResource", "ok"), 2),
            ]
        );
    }
}
