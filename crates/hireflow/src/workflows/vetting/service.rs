use std::sync::Arc;

use chrono::Duration;
use tracing::info;

use super::cache::{default_artifact_ttl, AssessmentResultCache, Fingerprint};
use super::catalog::Stage;
use super::domain::{
    AssessmentArtifact, AssessmentSubmission, CandidateId, GradedOutcome, RouteDecision,
    StageRecord,
};
use super::policy::decide_route;
use super::recorder::StageCompletionRecorder;
use super::store::{ProfileBackend, ProfileStageStore, StoreError};

/// Boundary to the external assessment scorers (resume parser, MCQ grader,
/// coding grader, interview scheduler). The core consumes only the pass and
/// scheduled flags of the graded outcome.
pub trait AssessmentScorer: Send + Sync {
    fn grade(
        &self,
        candidate: &CandidateId,
        submission: &AssessmentSubmission,
    ) -> Result<GradedOutcome, ScorerError>;
}

/// Failure reported by an external scorer. The stage record is left untouched
/// in this case, which keeps the candidate on their current stage.
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error("assessment scorer unavailable: {0}")]
    Unavailable(String),
    #[error("scorer rejected the submission: {0}")]
    Rejected(String),
}

/// Facade composing the stage store, transition policy, completion recorder,
/// and artifact cache behind the inbound contracts the UI layer calls.
pub struct VettingFlowService<B, S> {
    store: ProfileStageStore<B>,
    recorder: StageCompletionRecorder<B>,
    cache: AssessmentResultCache,
    scorer: Arc<S>,
    artifact_ttl: Duration,
}

impl<B, S> VettingFlowService<B, S>
where
    B: ProfileBackend,
    S: AssessmentScorer,
{
    pub fn new(backend: Arc<B>, scorer: Arc<S>) -> Self {
        Self::with_artifact_ttl(backend, scorer, default_artifact_ttl())
    }

    /// Build the service with a configured artifact lifetime instead of the
    /// default session TTL.
    pub fn with_artifact_ttl(backend: Arc<B>, scorer: Arc<S>, artifact_ttl: Duration) -> Self {
        let store = ProfileStageStore::new(backend);
        let recorder = StageCompletionRecorder::new(store.clone());
        Self {
            store,
            recorder,
            cache: AssessmentResultCache::default(),
            scorer,
            artifact_ttl,
        }
    }

    /// Fetch the candidate's record and compute where the UI should send them.
    pub fn decide_next_route(
        &self,
        candidate: &CandidateId,
        role: Option<&str>,
    ) -> Result<RouteDecision, ServiceError> {
        let record = self.store.get(candidate)?;
        // The policy emits the warn event itself when it falls back to a
        // restart; the decision carries the warning for the caller.
        Ok(decide_route(record.as_ref(), role))
    }

    /// Record an already-scored outcome against the candidate's stage record.
    pub fn record_outcome(
        &self,
        candidate: &CandidateId,
        stage: Stage,
        passed: bool,
        scheduled: bool,
    ) -> Result<StageRecord, ServiceError> {
        let record = self
            .recorder
            .record_outcome(candidate, stage, passed, scheduled)?;
        info!(
            candidate = %candidate.0,
            stage = stage.label(),
            status = record.last_status.label(),
            "stage outcome recorded"
        );
        Ok(record)
    }

    /// Grade a submission through the external scorer, then record the stage
    /// outcome. The scoring step always runs first and is never rolled back:
    /// if the bookkeeping write fails, the graded outcome is returned inside
    /// the error so the caller can retry the write without re-scoring.
    pub fn submit_assessment(
        &self,
        candidate: &CandidateId,
        submission: &AssessmentSubmission,
    ) -> Result<GradedOutcome, ServiceError> {
        let outcome = self.scorer.grade(candidate, submission)?;

        match self.recorder.record_outcome(
            candidate,
            outcome.stage,
            outcome.passed,
            outcome.scheduled,
        ) {
            Ok(_) => Ok(outcome),
            Err(source) => Err(ServiceError::StageWriteFailed { outcome, source }),
        }
    }

    pub fn cached_artifact(&self, fingerprint: Fingerprint) -> Option<AssessmentArtifact> {
        self.cache.get(fingerprint)
    }

    /// Store a generated artifact. `ttl` defaults to the service's configured
    /// artifact lifetime.
    pub fn store_artifact(
        &self,
        fingerprint: Fingerprint,
        artifact: AssessmentArtifact,
        ttl: Option<Duration>,
    ) {
        self.cache
            .put(fingerprint, artifact, ttl.unwrap_or(self.artifact_ttl));
    }

    pub fn invalidate_artifact(&self, fingerprint: Fingerprint) {
        self.cache.invalidate(fingerprint);
    }
}

/// Error raised by the vetting flow facade.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Scorer(#[from] ScorerError),
    /// The score is committed upstream; only the stage pointer write failed
    /// and should be retried by the caller.
    #[error("stage record write failed after grading: {source}")]
    StageWriteFailed {
        outcome: GradedOutcome,
        #[source]
        source: StoreError,
    },
}
