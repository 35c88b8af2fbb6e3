use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use hireflow::workflows::vetting::{
    AssessmentScorer, AssessmentSubmission, BackendError, CandidateId, GradedOutcome,
    ProfileBackend, ScorerError, StageRecord,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stage records held in process memory. Stands in for the profile service
/// until the real backend adapter is wired up.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileBackend {
    records: Arc<Mutex<HashMap<CandidateId, StageRecord>>>,
}

impl ProfileBackend for InMemoryProfileBackend {
    fn fetch(&self, candidate: &CandidateId) -> Result<Option<StageRecord>, BackendError> {
        let guard = self.records.lock().expect("backend mutex poisoned");
        Ok(guard.get(candidate).copied())
    }

    fn persist(&self, candidate: &CandidateId, record: StageRecord) -> Result<(), BackendError> {
        let mut guard = self.records.lock().expect("backend mutex poisoned");
        guard.insert(candidate.clone(), record);
        Ok(())
    }
}

pub(crate) const DEFAULT_PASS_MARK: f32 = 60.0;

/// Grades submissions at a fixed pass mark. The submission payload may carry
/// a pre-computed `score` from the upstream grader; absent that, the
/// submission is treated as ungradeable.
pub(crate) struct PassMarkScorer {
    pass_mark: f32,
}

impl Default for PassMarkScorer {
    fn default() -> Self {
        Self {
            pass_mark: DEFAULT_PASS_MARK,
        }
    }
}

impl AssessmentScorer for PassMarkScorer {
    fn grade(
        &self,
        _candidate: &CandidateId,
        submission: &AssessmentSubmission,
    ) -> Result<GradedOutcome, ScorerError> {
        let score = submission
            .payload
            .get("score")
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| {
                ScorerError::Rejected("submission payload carries no score".to_string())
            })? as f32;

        Ok(GradedOutcome {
            stage: submission.stage,
            score,
            passed: score >= self.pass_mark,
            scheduled: false,
        })
    }
}
