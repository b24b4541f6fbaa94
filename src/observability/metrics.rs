//! Metrics collection.
//!
//! # Metrics
//! - `pipeline_stage_total` (counter): stage executions by stage, outcome
//! - `pipeline_stage_duration_seconds` (histogram): wall time per stage
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; exposition is left to the host

use std::time::Instant;

/// Record the completion of a pipeline stage.
pub fn record_stage(stage: &'static str, success: bool, started: Instant) {
    let outcome = if success { "success" } else { "failure" };
    ::metrics::counter!("pipeline_stage_total", "stage" => stage, "outcome" => outcome).increment(1);
    ::metrics::histogram!("pipeline_stage_duration_seconds", "stage" => stage)
        .record(started.elapsed().as_secs_f64());
}
