use tracing::warn;

use super::catalog::{PipelineVariant, Stage};
use super::domain::{
    RouteDecision, RouteTarget, StageConsistencyWarning, StageRecord, StageStatus,
};

/// Compute the next action for a candidate from their stored stage record and
/// role title. Pure and deterministic: no clock, no randomness, no I/O beyond
/// the warn event emitted on the restart fallback.
///
/// Branch order matters and mirrors the documented pipeline semantics:
/// bootstrap, pipeline-membership fallback, the scheduled-interview hold,
/// failure handling (with the coding-test terminal exception), then
/// advance-on-pass (with the resume-upload interstitial exception).
pub fn decide_route(record: Option<&StageRecord>, role: Option<&str>) -> RouteDecision {
    let pipeline = PipelineVariant::for_role(role);

    let Some(record) = record else {
        // First login, nothing attempted yet.
        return RouteDecision::advance(RouteTarget::Stage(pipeline.first_stage()));
    };

    let Some(stage_index) = pipeline.index_of(record.last_stage) else {
        // The recorded stage does not belong to this role's pipeline. Happens
        // when role metadata changed after a stage was recorded, or on
        // corrupt/legacy data. Fail safe: restart, and make the drift
        // observable instead of silently proceeding.
        return restart_with_warning(pipeline, record);
    };

    match record.last_status {
        StageStatus::Scheduled => {
            if record.last_stage == Stage::Interview {
                RouteDecision::advance(RouteTarget::AwaitingInterview)
            } else {
                // The store rejects this pairing; a record that reaches us
                // anyway is backend drift and gets the same restart fallback.
                restart_with_warning(pipeline, record)
            }
        }
        StageStatus::Failed => {
            if record.last_stage == Stage::CodingTest {
                // Deliberate asymmetry: every other stage retries on failure,
                // a failed coding test routes to the feedback view instead.
                RouteDecision::advance(RouteTarget::CodingFeedback)
            } else {
                RouteDecision::retry(record.last_stage)
            }
        }
        StageStatus::Passed => {
            if record.last_stage == Stage::ResumeUpload {
                // One-stage lag: the resume stage keeps its own route after a
                // pass so the UI can show the success interstitial before
                // moving on.
                return RouteDecision::advance(RouteTarget::Stage(Stage::ResumeUpload));
            }

            let next_index = stage_index + 1;
            match pipeline.stages().get(next_index) {
                Some(next_stage) => RouteDecision::advance(RouteTarget::Stage(*next_stage)),
                None => RouteDecision::advance(RouteTarget::Completed),
            }
        }
    }
}

fn restart_with_warning(pipeline: PipelineVariant, record: &StageRecord) -> RouteDecision {
    let warning = StageConsistencyWarning {
        recorded_stage: record.last_stage,
        recorded_status: record.last_status,
        pipeline,
    };

    warn!(
        stage = record.last_stage.label(),
        status = record.last_status.label(),
        pipeline = pipeline.label(),
        "stage record does not belong to the candidate's pipeline; restarting"
    );

    RouteDecision {
        target: RouteTarget::Stage(pipeline.first_stage()),
        is_retry: false,
        consistency: Some(warning),
    }
}
