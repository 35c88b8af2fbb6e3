use super::catalog::Stage;
use super::domain::{CandidateId, StageRecord, StageStatus};
use super::store::{ProfileBackend, ProfileStageStore, StoreError};

/// Translates assessment outcomes into stage record writes. The recorder is
/// deliberately thin: the authoritative score is committed by the external
/// scorer before this runs, so a failed write here only loses the stage
/// pointer, never the result, and the caller can retry the write alone.
pub struct StageCompletionRecorder<B> {
    store: ProfileStageStore<B>,
}

impl<B> StageCompletionRecorder<B>
where
    B: ProfileBackend,
{
    pub fn new(store: ProfileStageStore<B>) -> Self {
        Self { store }
    }

    /// Derive the status for a reported outcome and persist it. `scheduled`
    /// takes precedence over `passed` and only applies to the interview
    /// stage; on any other stage it is ignored rather than rejected, since
    /// the pass/fail flag still describes a real outcome there.
    pub fn record_outcome(
        &self,
        candidate: &CandidateId,
        stage: Stage,
        passed: bool,
        scheduled: bool,
    ) -> Result<StageRecord, StoreError> {
        let status = if scheduled && stage == Stage::Interview {
            StageStatus::Scheduled
        } else if passed {
            StageStatus::Passed
        } else {
            StageStatus::Failed
        };

        let record = StageRecord::new(stage, status);
        self.store.set(candidate, record)?;
        Ok(record)
    }

    pub fn complete_profile_intake(
        &self,
        candidate: &CandidateId,
        passed: bool,
    ) -> Result<StageRecord, StoreError> {
        self.record_outcome(candidate, Stage::ProfileIntake, passed, false)
    }

    pub fn complete_resume_upload(
        &self,
        candidate: &CandidateId,
        passed: bool,
    ) -> Result<StageRecord, StoreError> {
        self.record_outcome(candidate, Stage::ResumeUpload, passed, false)
    }

    pub fn complete_mcq(
        &self,
        candidate: &CandidateId,
        passed: bool,
    ) -> Result<StageRecord, StoreError> {
        self.record_outcome(candidate, Stage::Mcq, passed, false)
    }

    pub fn complete_coding_test(
        &self,
        candidate: &CandidateId,
        passed: bool,
    ) -> Result<StageRecord, StoreError> {
        self.record_outcome(candidate, Stage::CodingTest, passed, false)
    }

    pub fn complete_interview(
        &self,
        candidate: &CandidateId,
        passed: bool,
        scheduled: bool,
    ) -> Result<StageRecord, StoreError> {
        self.record_outcome(candidate, Stage::Interview, passed, scheduled)
    }
}
