use std::sync::Arc;

use super::catalog::Stage;
use super::domain::{CandidateId, StageRecord, StageStatus};

/// Persistence abstraction over the external profile backend. Writes must be
/// idempotent: storing the same record twice is a no-op in effect.
pub trait ProfileBackend: Send + Sync {
    fn fetch(&self, candidate: &CandidateId) -> Result<Option<StageRecord>, BackendError>;
    fn persist(&self, candidate: &CandidateId, record: StageRecord) -> Result<(), BackendError>;
}

/// Failure reported by the profile backend itself.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("profile backend unavailable: {0}")]
    Unavailable(String),
    #[error("profile backend rejected the write: {0}")]
    WriteRejected(String),
}

/// Typed accessor over the externally persisted stage record. Validates the
/// stage/status pairing before any write reaches the backend.
pub struct ProfileStageStore<B> {
    backend: Arc<B>,
}

impl<B> Clone for ProfileStageStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> ProfileStageStore<B>
where
    B: ProfileBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Absence is a valid domain state (new candidate), not an error.
    pub fn get(&self, candidate: &CandidateId) -> Result<Option<StageRecord>, StoreError> {
        self.backend
            .fetch(candidate)
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }

    /// Overwrite the record, last-writer-wins. Rejects `Scheduled` paired
    /// with any stage other than `Interview` before touching the backend.
    pub fn set(&self, candidate: &CandidateId, record: StageRecord) -> Result<(), StoreError> {
        if !record.status_is_valid() {
            return Err(StoreError::InvalidStatusForStage {
                stage: record.last_stage,
                status: record.last_status,
            });
        }

        self.backend
            .persist(candidate, record)
            .map_err(|err| StoreError::PersistenceWrite(err.to_string()))
    }
}

/// Error taxonomy for stage record access.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Caller must correct its inputs; not retryable as-is.
    #[error("status '{}' is not valid for stage '{}'", status.label(), stage.label())]
    InvalidStatusForStage { stage: Stage, status: StageStatus },
    /// The write failed after any upstream scoring already committed.
    /// Recoverable: the caller should retry the write.
    #[error("stage record write failed: {0}")]
    PersistenceWrite(String),
    #[error("profile backend unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether retrying the same call can succeed without changed inputs.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::PersistenceWrite(_) | StoreError::Unavailable(_)
        )
    }
}
