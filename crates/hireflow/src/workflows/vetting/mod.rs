//! Candidate vetting stage machine: pipeline catalog, stage record store,
//! transition policy, completion recorder, and the session artifact cache.

pub mod cache;
pub mod catalog;
pub mod domain;
pub mod policy;
pub mod recorder;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use cache::{AssessmentResultCache, Clock, Fingerprint, SystemClock};
pub use catalog::{ordered_stages, PipelineVariant, RouteToken, Stage};
pub use domain::{
    AssessmentArtifact, AssessmentSubmission, CandidateId, CodingAssignment, GradedOutcome,
    McqQuestion, RouteDecision, RouteTarget, StageConsistencyWarning, StageRecord, StageStatus,
};
pub use policy::decide_route;
pub use recorder::StageCompletionRecorder;
pub use router::vetting_router;
pub use service::{AssessmentScorer, ScorerError, ServiceError, VettingFlowService};
pub use store::{BackendError, ProfileBackend, ProfileStageStore, StoreError};
