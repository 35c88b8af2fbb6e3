use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::workflows::vetting::cache::Clock;
use crate::workflows::vetting::catalog::Stage;
use crate::workflows::vetting::domain::{
    AssessmentArtifact, AssessmentSubmission, CandidateId, GradedOutcome, McqQuestion, StageRecord,
};
use crate::workflows::vetting::service::{AssessmentScorer, ScorerError, VettingFlowService};
use crate::workflows::vetting::store::{BackendError, ProfileBackend};

pub(super) fn candidate(suffix: &str) -> CandidateId {
    CandidateId(format!("cand-{suffix}"))
}

pub(super) fn mcq_submission() -> AssessmentSubmission {
    AssessmentSubmission {
        stage: Stage::Mcq,
        payload: json!({ "answers": [0, 2, 1, 3] }),
    }
}

pub(super) fn mcq_artifact() -> AssessmentArtifact {
    AssessmentArtifact::McqBatch {
        questions: vec![McqQuestion {
            prompt: "Which HTTP status signals a permanent redirect?".to_string(),
            options: vec!["301".to_string(), "302".to_string(), "307".to_string()],
            answer_index: 0,
        }],
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryBackend {
    records: Arc<Mutex<HashMap<CandidateId, StageRecord>>>,
}

impl MemoryBackend {
    pub(super) fn record_for(&self, candidate: &CandidateId) -> Option<StageRecord> {
        self.records
            .lock()
            .expect("backend mutex poisoned")
            .get(candidate)
            .copied()
    }

    pub(super) fn seed(&self, candidate: &CandidateId, record: StageRecord) {
        self.records
            .lock()
            .expect("backend mutex poisoned")
            .insert(candidate.clone(), record);
    }

    pub(super) fn is_empty(&self) -> bool {
        self.records.lock().expect("backend mutex poisoned").is_empty()
    }
}

impl ProfileBackend for MemoryBackend {
    fn fetch(&self, candidate: &CandidateId) -> Result<Option<StageRecord>, BackendError> {
        Ok(self.record_for(candidate))
    }

    fn persist(&self, candidate: &CandidateId, record: StageRecord) -> Result<(), BackendError> {
        self.records
            .lock()
            .expect("backend mutex poisoned")
            .insert(candidate.clone(), record);
        Ok(())
    }
}

/// Reads succeed but every write fails, as when the profile service is up for
/// queries and degraded for mutations.
#[derive(Default, Clone)]
pub(super) struct WriteFailingBackend;

impl ProfileBackend for WriteFailingBackend {
    fn fetch(&self, _candidate: &CandidateId) -> Result<Option<StageRecord>, BackendError> {
        Ok(None)
    }

    fn persist(&self, _candidate: &CandidateId, _record: StageRecord) -> Result<(), BackendError> {
        Err(BackendError::WriteRejected("disk full".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct UnavailableBackend;

impl ProfileBackend for UnavailableBackend {
    fn fetch(&self, _candidate: &CandidateId) -> Result<Option<StageRecord>, BackendError> {
        Err(BackendError::Unavailable("profile service offline".to_string()))
    }

    fn persist(&self, _candidate: &CandidateId, _record: StageRecord) -> Result<(), BackendError> {
        Err(BackendError::Unavailable("profile service offline".to_string()))
    }
}

/// Scorer spy returning a fixed outcome and counting how often it ran.
pub(super) struct SpyScorer {
    outcome: Result<GradedOutcome, String>,
    pub(super) calls: AtomicUsize,
}

impl SpyScorer {
    pub(super) fn passing(stage: Stage) -> Self {
        Self {
            outcome: Ok(GradedOutcome {
                stage,
                score: 82.5,
                passed: true,
                scheduled: false,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn failing_grade(stage: Stage) -> Self {
        Self {
            outcome: Ok(GradedOutcome {
                stage,
                score: 31.0,
                passed: false,
                scheduled: false,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn unavailable() -> Self {
        Self {
            outcome: Err("grader timeout".to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl AssessmentScorer for SpyScorer {
    fn grade(
        &self,
        _candidate: &CandidateId,
        _submission: &AssessmentSubmission,
    ) -> Result<GradedOutcome, ScorerError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match &self.outcome {
            Ok(outcome) => Ok(outcome.clone()),
            Err(message) => Err(ScorerError::Unavailable(message.clone())),
        }
    }
}

/// Clock the tests advance by hand. Clones share the same instant.
#[derive(Clone)]
pub(super) struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub(super) fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub(super) fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

pub(super) fn build_service() -> (
    Arc<VettingFlowService<MemoryBackend, SpyScorer>>,
    Arc<MemoryBackend>,
    Arc<SpyScorer>,
) {
    let backend = Arc::new(MemoryBackend::default());
    let scorer = Arc::new(SpyScorer::passing(Stage::Mcq));
    let service = Arc::new(VettingFlowService::new(backend.clone(), scorer.clone()));
    (service, backend, scorer)
}
