use crate::workflows::vetting::catalog::{PipelineVariant, Stage};
use crate::workflows::vetting::domain::{RouteTarget, StageRecord, StageStatus};
use crate::workflows::vetting::policy::decide_route;

fn record(stage: Stage, status: StageStatus) -> StageRecord {
    StageRecord::new(stage, status)
}

#[test]
fn identical_inputs_yield_identical_decisions() {
    let stored = record(Stage::Mcq, StageStatus::Passed);
    for role in [None, Some(""), Some("Backend Engineer"), Some("Devops")] {
        let first = decide_route(Some(&stored), role);
        let second = decide_route(Some(&stored), role);
        assert_eq!(first, second, "policy must be deterministic for {role:?}");
    }
}

#[test]
fn no_record_bootstraps_to_profile_intake_for_every_role() {
    for role in [None, Some(""), Some("Devops"), Some("Frontend Engineer")] {
        let decision = decide_route(None, role);
        assert_eq!(decision.target, RouteTarget::Stage(Stage::ProfileIntake));
        assert!(!decision.is_retry);
        assert!(decision.consistency.is_none());
    }
}

#[test]
fn failure_retries_the_same_stage_except_coding() {
    for stage in [Stage::ProfileIntake, Stage::ResumeUpload, Stage::Mcq, Stage::Interview] {
        let stored = record(stage, StageStatus::Failed);
        let decision = decide_route(Some(&stored), None);
        assert_eq!(decision.target, RouteTarget::Stage(stage));
        assert!(decision.is_retry, "{} should retry on failure", stage.label());
    }
}

#[test]
fn coding_failure_routes_to_feedback_not_retry() {
    let stored = record(Stage::CodingTest, StageStatus::Failed);
    let decision = decide_route(Some(&stored), None);
    assert_eq!(decision.target, RouteTarget::CodingFeedback);
    assert!(!decision.is_retry);
}

#[test]
fn mcq_pass_advances_to_coding_on_standard_pipeline() {
    let stored = record(Stage::Mcq, StageStatus::Passed);
    let decision = decide_route(Some(&stored), Some(""));
    assert_eq!(decision.target, RouteTarget::Stage(Stage::CodingTest));
    assert!(!decision.is_retry);
}

#[test]
fn mcq_pass_skips_coding_for_devops_roles() {
    for role in ["Devops", "DevOps Engineer", "site reliability engineer"] {
        let stored = record(Stage::Mcq, StageStatus::Passed);
        let decision = decide_route(Some(&stored), Some(role));
        assert_eq!(
            decision.target,
            RouteTarget::Stage(Stage::Interview),
            "{role} should skip the coding stage"
        );
    }
}

#[test]
fn interview_pass_completes_both_pipelines() {
    let stored = record(Stage::Interview, StageStatus::Passed);
    for role in [None, Some("Devops")] {
        let decision = decide_route(Some(&stored), role);
        assert_eq!(decision.target, RouteTarget::Completed);
        assert!(!decision.is_retry);
    }
}

#[test]
fn scheduled_interview_holds_without_completing_or_retrying() {
    let stored = record(Stage::Interview, StageStatus::Scheduled);
    let decision = decide_route(Some(&stored), None);
    assert_eq!(decision.target, RouteTarget::AwaitingInterview);
    assert!(!decision.is_retry);
    assert!(decision.consistency.is_none());
}

#[test]
fn resume_pass_keeps_its_own_route_for_the_success_interstitial() {
    let stored = record(Stage::ResumeUpload, StageStatus::Passed);
    let decision = decide_route(Some(&stored), None);
    assert_eq!(decision.target, RouteTarget::Stage(Stage::ResumeUpload));
    assert!(!decision.is_retry);
}

#[test]
fn role_switch_after_mcq_still_resolves_the_shared_stage() {
    // Passed MCQ while Standard, then role metadata edited to a coding-skip
    // title: MCQ exists in both pipelines at a different index, so the
    // candidate advances to Interview, not CodingTest, and no warning fires.
    let stored = record(Stage::Mcq, StageStatus::Passed);
    let decision = decide_route(Some(&stored), Some("Platform Engineer"));
    assert_eq!(decision.target, RouteTarget::Stage(Stage::Interview));
    assert!(decision.consistency.is_none());
}

#[test]
fn stage_outside_pipeline_restarts_with_warning() {
    // A recorded coding stage under a coding-skip role has no pipeline slot.
    let stored = record(Stage::CodingTest, StageStatus::Passed);
    let decision = decide_route(Some(&stored), Some("Devops"));
    assert_eq!(decision.target, RouteTarget::Stage(Stage::ProfileIntake));
    assert!(!decision.is_retry);

    let warning = decision.consistency.expect("consistency warning surfaced");
    assert_eq!(warning.recorded_stage, Stage::CodingTest);
    assert_eq!(warning.pipeline, PipelineVariant::CodingSkip);
}

#[test]
fn scheduled_status_on_non_interview_stage_restarts_with_warning() {
    // The store rejects this pairing on write; a record read back in this
    // shape is backend drift and gets the restart fallback.
    let stored = record(Stage::Mcq, StageStatus::Scheduled);
    let decision = decide_route(Some(&stored), None);
    assert_eq!(decision.target, RouteTarget::Stage(Stage::ProfileIntake));
    assert!(decision.consistency.is_some());
}

#[test]
fn pipeline_catalog_is_total_over_roles() {
    assert_eq!(PipelineVariant::for_role(None), PipelineVariant::Standard);
    assert_eq!(PipelineVariant::for_role(Some("")), PipelineVariant::Standard);
    assert_eq!(
        PipelineVariant::for_role(Some("  DevOps  ")),
        PipelineVariant::CodingSkip
    );
    assert_eq!(
        PipelineVariant::for_role(Some("Devops Manager")),
        PipelineVariant::Standard,
        "only exact titles map to the skip pipeline"
    );
}

#[test]
fn coding_stage_has_no_index_in_the_skip_pipeline() {
    assert_eq!(PipelineVariant::CodingSkip.index_of(Stage::CodingTest), None);
    assert_eq!(PipelineVariant::Standard.index_of(Stage::CodingTest), Some(3));
    assert_eq!(PipelineVariant::CodingSkip.index_of(Stage::Mcq), Some(2));
}
